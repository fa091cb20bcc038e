//! Plain-text rendering of derived views

use amplie_core::{Contact, ContactView, KanbanBoard, Result, Ticket, TicketBoard, TicketStatus};
use serde::Serialize;
use std::io::Write;

/// Pretty JSON followed by a newline
pub(crate) fn json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn ticket_line<W: Write>(out: &mut W, ticket: &Ticket) -> Result<()> {
    let agent = ticket.agent.as_deref().unwrap_or("-");
    writeln!(
        out,
        "  #{:<5} {:<24} {:<12} {:<16} {}",
        ticket.id, ticket.customer_name, ticket.department, agent, ticket.elapsed
    )?;
    Ok(())
}

/// Open section with hand-off banners, then pending section
pub(crate) fn ticket_board<W: Write>(out: &mut W, board: &TicketBoard<'_>) -> Result<()> {
    writeln!(out, "Open tickets ({})", board.open_count())?;
    for (ticket, transfer) in board.banners() {
        writeln!(out, "  >> {transfer}")?;
        ticket_line(out, ticket)?;
    }
    for ticket in &board.open.normal {
        ticket_line(out, ticket)?;
    }
    if board.open_is_empty() {
        writeln!(out, "  No open tickets")?;
    }

    writeln!(out)?;
    writeln!(out, "Pending tickets ({})", board.pending_count())?;
    for ticket in &board.pending {
        ticket_line(out, ticket)?;
    }
    if board.pending_is_empty() {
        writeln!(out, "  No pending tickets")?;
    }
    Ok(())
}

const fn column_title(status: TicketStatus) -> &'static str {
    match status {
        TicketStatus::New => "New",
        TicketStatus::InProgress => "In progress",
        TicketStatus::Pending => "Pending",
        TicketStatus::Finished => "Finished",
    }
}

/// One block per kanban column
pub(crate) fn kanban<W: Write>(out: &mut W, board: &KanbanBoard<'_>) -> Result<()> {
    for (i, column) in board.columns.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(
            out,
            "{} ({})",
            column_title(column.status),
            column.tickets.len()
        )?;
        for ticket in &column.tickets {
            ticket_line(out, ticket)?;
        }
    }
    Ok(())
}

fn contact_line<W: Write>(out: &mut W, contact: &Contact) -> Result<()> {
    let tags: Vec<&str> = contact.tags.iter().map(String::as_str).collect();
    writeln!(
        out,
        "  #{:<5} {:<24} {:<20} {:<28} {:<12} {:<9} {}",
        contact.id,
        contact.name,
        contact.phone,
        contact.email.as_deref().unwrap_or("-"),
        contact.last_department,
        contact.status,
        tags.join(", ")
    )?;
    Ok(())
}

/// Summary cards followed by the filtered table
pub(crate) fn contact_view<W: Write>(out: &mut W, view: &ContactView<'_>) -> Result<()> {
    let summary = view.summary;
    writeln!(
        out,
        "Total: {}  Mine: {}  Active: {}  VIP: {}",
        summary.total, summary.mine, summary.active, summary.vip
    )?;
    writeln!(out)?;

    for contact in &view.contacts {
        contact_line(out, contact)?;
    }
    if view.contacts.is_empty() {
        writeln!(out, "  No contacts match the current filters")?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use amplie_core::{ContactBook, ContactCriteria, ContactScope, Transfer};
    use pretty_assertions::assert_eq;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_board_puts_banner_before_normal_tickets() {
        let tickets = vec![
            Ticket::new(1, "João Silva", "Vendas", TicketStatus::New),
            Ticket::new(2, "Maria Santos", "Suporte", TicketStatus::InProgress).with_transfer(
                Transfer {
                    from_agent: "Carlos Santos".to_string(),
                    reason: "Dúvida técnica".to_string(),
                    transferred_at: "10:15".to_string(),
                },
            ),
        ];
        let board = TicketBoard::build(&tickets);
        let text = render(|out| ticket_board(out, &board));

        let banner = text.find(">> Transfer from Carlos Santos").unwrap();
        let maria = text.find("Maria Santos").unwrap();
        let joao = text.find("João Silva").unwrap();
        assert!(banner < maria && maria < joao);
        assert!(text.contains("Open tickets (2)"));
        assert!(text.contains("No pending tickets"));
    }

    #[test]
    fn test_empty_board() {
        let tickets: Vec<Ticket> = Vec::new();
        let board = TicketBoard::build(&tickets);
        let text = render(|out| ticket_board(out, &board));
        assert!(text.contains("No open tickets"));
        assert!(text.contains("No pending tickets"));
    }

    #[test]
    fn test_kanban_titles() {
        let tickets = vec![Ticket::new(1, "João", "Vendas", TicketStatus::Pending)];
        let board = KanbanBoard::build(&tickets);
        let text = render(|out| kanban(out, &board));
        let titles: Vec<&str> = text
            .lines()
            .filter(|l| !l.starts_with(' ') && !l.is_empty())
            .collect();
        assert_eq!(
            titles,
            vec!["New (0)", "In progress (0)", "Pending (1)", "Finished (0)"]
        );
    }

    #[test]
    fn test_contact_view_empty_state() {
        let book = ContactBook::new();
        let view = book.view(&ContactScope::all("Ana Silva"), "", &ContactCriteria::default());
        let text = render(|out| contact_view(out, &view));
        assert!(text.starts_with("Total: 0  Mine: 0  Active: 0  VIP: 0"));
        assert!(text.contains("No contacts match"));
    }

    #[test]
    fn test_json_output() {
        let text = render(|out| json(out, &ContactCriteria::default().tag("VIP")));
        assert_eq!(text, "{\n  \"tag\": \"VIP\"\n}\n");
    }
}
