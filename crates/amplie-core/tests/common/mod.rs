//! Common test utilities and fixtures for integration tests

#![allow(dead_code, clippy::unwrap_used)]

pub mod fixtures;

pub use fixtures::*;

use std::sync::Once;

static LOGGING: Once = Once::new();

/// Install a test subscriber once per test binary
pub fn init_test_logging() {
    LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("amplie_core=debug")
            .with_test_writer()
            .try_init();
    });
}

/// Ids of a borrowed row list
pub fn ids<T: HasId>(rows: &[&T]) -> Vec<u64> {
    rows.iter().map(|r| r.row_id()).collect()
}

/// Anything listed by id in assertions
pub trait HasId {
    /// Identifier used in assertions
    fn row_id(&self) -> u64;
}

impl HasId for amplie_core::Ticket {
    fn row_id(&self) -> u64 {
        self.id
    }
}

impl HasId for amplie_core::Contact {
    fn row_id(&self) -> u64 {
        self.id
    }
}
