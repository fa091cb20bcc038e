//! Snapshot fixtures mirroring the dashboard's demo data

use amplie_core::{AgentAssignment, Contact, ContactStatus, Ticket, TicketStatus, Transfer};
use chrono::NaiveDate;

fn at(day: u32, hour: u32, minute: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

/// The three contacts the contacts page starts with
pub fn demo_contacts() -> Vec<Contact> {
    vec![
        Contact {
            id: 1,
            name: "João Silva".to_string(),
            phone: "+55 11 99999-9999".to_string(),
            email: Some("joao@email.com".to_string()),
            last_agent: "Ana Silva".to_string(),
            last_department: "Vendas".to_string(),
            last_interaction_at: at(12, 14, 30),
            tags: ["VIP", "Interessado"].into_iter().map(String::from).collect(),
            status: ContactStatus::Active,
            total_interactions: 5,
            associated_agents: vec![
                AgentAssignment::new("Vendas", "Ana Silva"),
                AgentAssignment::new("Suporte", "Carlos Santos"),
            ],
        },
        Contact {
            id: 2,
            name: "Maria Santos".to_string(),
            phone: "+55 11 88888-8888".to_string(),
            email: Some("maria@email.com".to_string()),
            last_agent: "Carlos Santos".to_string(),
            last_department: "Suporte".to_string(),
            last_interaction_at: at(12, 13, 15),
            tags: ["Problema Recorrente"].into_iter().map(String::from).collect(),
            status: ContactStatus::Active,
            total_interactions: 12,
            associated_agents: vec![AgentAssignment::new("Suporte", "Carlos Santos")],
        },
        Contact {
            id: 3,
            name: "Pedro Oliveira".to_string(),
            phone: "+55 11 77777-7777".to_string(),
            email: None,
            last_agent: "Ana Silva".to_string(),
            last_department: "Vendas".to_string(),
            last_interaction_at: at(12, 12, 0),
            tags: ["Novo Contato"].into_iter().map(String::from).collect(),
            status: ContactStatus::Active,
            total_interactions: 1,
            associated_agents: vec![AgentAssignment::new("Vendas", "Ana Silva")],
        },
    ]
}

fn ticket(id: u64, customer: &str, status: TicketStatus) -> Ticket {
    let mut ticket = Ticket::new(id, customer, "Suporte", status);
    ticket.phone = format!("+55 11 9{id:04}-0000");
    ticket.last_message = "Olá, preciso de ajuda".to_string();
    ticket.elapsed = format!("{id} min");
    ticket
}

/// A mixed attendance queue with two hand-offs
pub fn demo_tickets() -> Vec<Ticket> {
    let handoff = |from: &str, reason: &str, when: &str| Transfer {
        from_agent: from.to_string(),
        reason: reason.to_string(),
        transferred_at: when.to_string(),
    };

    let mut in_progress = ticket(2, "Maria Santos", TicketStatus::InProgress);
    in_progress.agent = Some("Ana Silva".to_string());

    vec![
        ticket(1, "João Silva", TicketStatus::New),
        in_progress,
        ticket(3, "Pedro Oliveira", TicketStatus::Pending),
        ticket(4, "Lucia Ferreira", TicketStatus::New).with_transfer(handoff(
            "Carlos Santos",
            "Cliente solicitou orçamento",
            "2024-06-12 14:20",
        )),
        ticket(5, "Rafael Costa", TicketStatus::Finished),
        ticket(6, "Beatriz Lima", TicketStatus::InProgress).with_transfer(handoff(
            "Financeiro",
            "Segunda via de boleto",
            "2024-06-12 14:25",
        )),
        ticket(7, "Tiago Alves", TicketStatus::Pending),
    ]
}
