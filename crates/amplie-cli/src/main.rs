//! Amplie snapshot viewer
//!
//! Reads ticket or contact snapshots exported as JSON and prints the same
//! derived views the dashboard renders: the attendance board, the kanban
//! columns and the filtered contact table with its summary cards.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

mod render;

use amplie_core::{
    Config, ContactBook, ContactCriteria, ContactScope, ContactStatus, KanbanBoard, Result,
    Ticket, TicketBoard, tickets,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, error};

/// Command line interface for the Amplie snapshot viewer
#[derive(Debug, Parser)]
#[command(
    name = "amplie",
    version = env!("CARGO_PKG_VERSION"),
    about = "Derived views over Amplie ticket and contact snapshots"
)]
struct Cli {
    /// Configuration file path (defaults to ./amplie.toml when present)
    #[arg(short, long, value_name = "FILE", env = "AMPLIE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Subcommand
    #[command(subcommand)]
    command: Commands,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Human readable table
    Table,
    /// Pretty printed JSON
    Json,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the attendance board: open tickets (hand-offs first) and pending
    Tickets {
        /// JSON array of tickets
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },

    /// Show tickets grouped into kanban columns
    Kanban {
        /// JSON array of tickets
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },

    /// Show summary cards and the filtered contact list
    Contacts {
        /// JSON array of contacts
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Only contacts associated with the current agent
        #[arg(long)]
        mine: bool,

        /// Current agent (overrides configuration)
        #[arg(long)]
        agent: Option<String>,

        /// Free-text search over name, phone and e-mail
        #[arg(short, long, default_value = "")]
        search: String,

        /// Department of the last interaction
        #[arg(long)]
        department: Option<String>,

        /// Contact status (active, inactive, blocked)
        #[arg(long)]
        status: Option<String>,

        /// Required tag
        #[arg(long)]
        tag: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },

    /// Print the resolved configuration
    Config,
}

fn main() -> ExitCode {
    if let Some(note) = dotenv_note(&dotenvy::dotenv()) {
        eprintln!("{note}");
    }

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Message worth printing for a `.env` load; a missing file is the normal case
fn dotenv_note(loaded: &dotenvy::Result<PathBuf>) -> Option<String> {
    match loaded {
        Ok(_) => None,
        Err(e) if e.not_found() => None,
        Err(e) => Some(format!("Note: .env file not loaded: {e}")),
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match cli.config.as_deref() {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    amplie_core::init_logging(&config.logging)?;
    debug!(?config, "configuration loaded");

    let mut out = std::io::stdout().lock();
    execute(cli.command, &config, &mut out)
}

/// Run one subcommand against `config`, writing its output to `out`
fn execute<W: Write>(command: Commands, config: &Config, out: &mut W) -> Result<()> {
    match command {
        Commands::Tickets { file, format } => {
            let tickets: Vec<Ticket> = read_snapshot(&file)?;
            tickets::validate_snapshot(&tickets)?;
            let board = TicketBoard::build(&tickets);
            match format {
                Format::Table => render::ticket_board(out, &board),
                Format::Json => render::json(out, &board),
            }
        }
        Commands::Kanban { file, format } => {
            let tickets: Vec<Ticket> = read_snapshot(&file)?;
            tickets::validate_snapshot(&tickets)?;
            let kanban = KanbanBoard::build(&tickets);
            match format {
                Format::Table => render::kanban(out, &kanban),
                Format::Json => render::json(out, &kanban),
            }
        }
        Commands::Contacts {
            file,
            mine,
            agent,
            search,
            department,
            status,
            tag,
            format,
        } => {
            let book = ContactBook::from_snapshot(read_snapshot(&file)?)?
                .vip_tag(config.contacts.vip_tag.clone());
            let agent = agent.unwrap_or_else(|| config.agent.current_agent.clone());
            let scope = if mine {
                ContactScope::mine(agent)
            } else {
                ContactScope::all(agent)
            };
            let criteria = ContactCriteria {
                department,
                status: status
                    .as_deref()
                    .filter(|s| !s.is_empty())
                    .map(str::parse::<ContactStatus>)
                    .transpose()?,
                tag,
            };

            let view = book.view(&scope, &search, &criteria);
            match format {
                Format::Table => render::contact_view(out, &view),
                Format::Json => render::json(out, &view),
            }
        }
        Commands::Config => render::json(out, config),
    }
}

fn read_snapshot<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = std::fs::read_to_string(path)?;
    let snapshot = serde_json::from_str(&data)?;
    debug!(path = %path.display(), bytes = data.len(), "snapshot read");
    Ok(snapshot)
}

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used)]
mod tests {
    use super::*;
    use amplie_core::Error;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    const CONTACTS: &str = r#"[
        {
            "id": 1,
            "name": "João Silva",
            "phone": "+55 11 99999-9999",
            "email": "joao@email.com",
            "last_agent": "Ana Silva",
            "last_department": "Vendas",
            "last_interaction_at": "2024-06-12 14:30",
            "tags": ["VIP", "Interessado"],
            "status": "active",
            "total_interactions": 5,
            "associated_agents": [
                {"department": "Vendas", "agent": "Ana Silva"},
                {"department": "Suporte", "agent": "Carlos Santos"}
            ]
        },
        {
            "id": 2,
            "name": "Maria Santos",
            "phone": "+55 11 88888-8888",
            "email": "maria@email.com",
            "last_agent": "Carlos Santos",
            "last_department": "Suporte",
            "last_interaction_at": "2024-06-12 13:15",
            "tags": ["Problema Recorrente"],
            "status": "active",
            "total_interactions": 12,
            "associated_agents": [{"department": "Suporte", "agent": "Carlos Santos"}]
        }
    ]"#;

    const TICKETS: &str = r#"[
        {"id": 1, "customer_name": "João Silva", "phone": "1", "department": "Vendas", "status": "new"},
        {"id": 2, "customer_name": "Maria Santos", "phone": "2", "department": "Suporte", "status": "pending"},
        {"id": 3, "customer_name": "Pedro Oliveira", "phone": "3", "department": "Vendas", "status": "finished"},
        {"id": 4, "customer_name": "Ana Costa", "phone": "4", "department": "Suporte", "status": "in_progress",
         "transfer": {"from_agent": "Carlos Santos", "reason": "Segunda via", "transferred_at": "10:15"}}
    ]"#;

    fn snapshot(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    fn exec(args: &[&str], config: &Config) -> Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("amplie").chain(args.iter().copied()))
            .unwrap();
        let mut out = Vec::new();
        execute(cli.command, config, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_contacts_arguments() {
        let cli = Cli::try_parse_from([
            "amplie",
            "contacts",
            "contacts.json",
            "--mine",
            "--search",
            "joao",
            "--status",
            "active",
            "--format",
            "json",
        ])
        .map_err(|e| e.to_string());

        match cli.map(|c| c.command) {
            Ok(Commands::Contacts {
                mine,
                search,
                status,
                format,
                ..
            }) => {
                assert!(mine);
                assert_eq!(search, "joao");
                assert_eq!(status.as_deref(), Some("active"));
                assert_eq!(format, Format::Json);
            }
            other => panic!("unexpected parse result: {other:?}"),
        }
    }

    #[test]
    fn test_tickets_requires_file() {
        assert!(Cli::try_parse_from(["amplie", "tickets"]).is_err());
    }

    #[test]
    fn test_dotenv_note_skips_only_missing_file() {
        let missing = dotenvy::Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no .env",
        ));
        assert_eq!(dotenv_note(&Err(missing)), None);
        assert_eq!(dotenv_note(&Ok(PathBuf::from(".env"))), None);

        let unreadable = dotenvy::Error::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let note = dotenv_note(&Err(unreadable)).unwrap();
        assert!(note.starts_with("Note: .env file not loaded"));

        let malformed = dotenvy::Error::LineParse("KEY VALUE".to_string(), 4);
        assert!(dotenv_note(&Err(malformed)).is_some());
    }

    #[test]
    fn test_tickets_table_from_snapshot() {
        let file = snapshot(TICKETS);
        let path = file.path().to_str().unwrap();
        let text = exec(&["tickets", path], &Config::default()).unwrap();

        assert!(text.starts_with("Open tickets (2)\n  >> Transfer from Carlos Santos"));
        assert!(text.contains("Pending tickets (1)"));
        assert!(!text.contains("Pedro Oliveira"));
    }

    #[test]
    fn test_kanban_json_from_snapshot() {
        let file = snapshot(TICKETS);
        let path = file.path().to_str().unwrap();
        let text = exec(&["kanban", path, "--format", "json"], &Config::default()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let sizes: Vec<usize> = value["columns"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["tickets"].as_array().unwrap().len())
            .collect();
        assert_eq!(sizes, vec![1, 1, 1, 1]);
    }

    #[test]
    fn test_ticket_snapshot_with_repeated_id_is_rejected() {
        let file = snapshot(
            r#"[
                {"id": 1, "customer_name": "João", "phone": "1", "department": "Vendas", "status": "new"},
                {"id": 1, "customer_name": "Maria", "phone": "2", "department": "Vendas", "status": "new"}
            ]"#,
        );
        let path = file.path().to_str().unwrap();
        let err = exec(&["tickets", path], &Config::default()).unwrap_err();
        assert!(matches!(err, Error::Validation { field, .. } if field == "id"));
    }

    #[test]
    fn test_contacts_mine_follows_configured_agent() {
        let file = snapshot(CONTACTS);
        let path = file.path().to_str().unwrap();

        let text = exec(&["contacts", path, "--mine", "--format", "json"], &Config::default())
            .unwrap();
        let view: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(view["contacts"].as_array().unwrap().len(), 1);
        assert_eq!(view["contacts"][0]["name"], "João Silva");
        assert_eq!(view["summary"]["total"], 2);
        assert_eq!(view["summary"]["mine"], 1);

        let mut config = Config::default();
        config.agent.current_agent = "Carlos Santos".to_string();
        let text = exec(&["contacts", path, "--mine", "--format", "json"], &config).unwrap();
        let view: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(view["contacts"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_contacts_agent_flag_overrides_config() {
        let file = snapshot(CONTACTS);
        let path = file.path().to_str().unwrap();

        let text = exec(
            &["contacts", path, "--mine", "--agent", "Bruno Costa"],
            &Config::default(),
        )
        .unwrap();
        assert!(text.starts_with("Total: 2  Mine: 0  Active: 2  VIP: 1"));
        assert!(text.contains("No contacts match the current filters"));
    }

    #[test]
    fn test_contacts_search_and_vip_tag_from_config() {
        let file = snapshot(CONTACTS);
        let path = file.path().to_str().unwrap();

        let mut config = Config::default();
        config.contacts.vip_tag = "Problema Recorrente".to_string();
        let text = exec(&["contacts", path, "--search", "joao", "--status", "active"], &config)
            .unwrap();
        assert!(text.starts_with("Total: 2  Mine: 1  Active: 2  VIP: 1"));
        assert!(text.contains("João Silva"));
        assert!(!text.contains("Maria Santos"));
    }

    #[test]
    fn test_contacts_unknown_status_is_validation_error() {
        let file = snapshot(CONTACTS);
        let path = file.path().to_str().unwrap();
        let err = exec(&["contacts", path, "--status", "archived"], &Config::default()).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn test_contacts_invalid_snapshot_is_rejected() {
        let file = snapshot(
            r#"[{"id": 1, "name": "", "phone": "1", "last_interaction_at": "2024-06-12 14:30"}]"#,
        );
        let path = file.path().to_str().unwrap();
        let err = exec(&["contacts", path], &Config::default()).unwrap_err();
        assert!(matches!(err, Error::Validation { field, .. } if field == "name"));
    }

    #[test]
    fn test_missing_snapshot_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = exec(&["tickets", path.to_str().unwrap()], &Config::default()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_malformed_snapshot_is_serialization_error() {
        let file = snapshot("[{\"id\": 1,");
        let path = file.path().to_str().unwrap();
        let err = exec(&["kanban", path], &Config::default()).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_config_command_prints_resolved_config() {
        let mut config = Config::default();
        config.contacts.vip_tag = "Ouro".to_string();
        let text = exec(&["config"], &config).unwrap();

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["contacts"]["vip_tag"], "Ouro");
        assert_eq!(value["agent"]["current_agent"], "Ana Silva");
    }
}
