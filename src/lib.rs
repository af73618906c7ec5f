//! # opsconsole - Operator console for a records backend
//!
//! Browse, page through, create, edit and delete records of a handful of
//! simple entity types over a REST backend, and run the backend's
//! predefined reporting queries.
//!
//! opsconsole provides:
//! - An access layer over the `/api/{resource}` REST contract
//! - A schema-driven record table reused by every entity page
//! - A query runner with first-row column discovery
//! - An interactive navigation shell and one-shot commands
//! - An in-memory mock backend speaking the same contract

pub mod api;
pub mod config;
pub mod entities;
pub mod query;
pub mod record;
pub mod schema;
pub mod server;
pub mod shell;
pub mod table;
pub mod ui;

// Re-exports for convenient access
pub use api::{ApiClient, Backend};
pub use config::ConsoleConfig;
pub use query::QueryRunner;
pub use record::Record;
pub use schema::{Column, Schema, ValueKind};
pub use table::RecordTable;

/// Result type alias for opsconsole operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for opsconsole operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Non-2xx response; carries the body text, or the status text when the
    /// body was empty.
    #[error("{0}")]
    Request(String),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Validation(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
