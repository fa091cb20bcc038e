//! Core types and list derivations for the Amplie attendance dashboard
//!
//! The dashboard pages only ever render derived views of in-memory
//! snapshots. This crate holds those derivations as plain functions:
//!
//! - [`tickets`]: open/pending buckets, transfer highlighting, kanban columns
//! - [`contacts`]: scope, search and criteria filtering plus summary cards
//! - [`book`]: the contact master list and its create/edit/delete transitions

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod book;
pub mod config;
pub mod contacts;
pub mod error;
pub mod tickets;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use book::{ContactBook, ContactView};
pub use crate::config::Config;
pub use contacts::{ContactCriteria, ContactFilter, ContactScope, ContactSummary, ScopeMode, filter};
pub use error::{Error, Result};
pub use tickets::{KanbanBoard, TicketBoard, classify, split_by_transfer};
pub use types::{
    AgentAssignment, Contact, ContactId, ContactStatus, Ticket, TicketId, TicketStatus, Transfer,
};

/// Initialize the logging system
///
/// `RUST_LOG` takes precedence over the configured level. `format` is either
/// `json` or anything else for human readable output. Events go to stderr.
///
/// # Errors
///
/// Returns an error if the level is not a valid filter directive or a global
/// subscriber is already installed.
pub fn init_logging(logging: &crate::config::LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&logging.level).map_err(|e| Error::Configuration {
            message: format!("invalid log level '{}': {e}", logging.level),
        })?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    let result = if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init()
    };

    result.map_err(|e| Error::Other(format!("failed to install logger: {e}")))
}
