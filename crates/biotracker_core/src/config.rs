//! Runtime configuration for the tracker core.
//!
//! # Responsibility
//! - Resolve the database target and gate secret into an explicit object
//!   handed to the persistence opener.
//!
//! # Invariants
//! - Configuration is read once and passed by value; the core keeps no
//!   process-wide mutable configuration state.
//! - The gate secret is carried opaquely for the external gate
//!   collaborator; the core never embeds a default or compares the value.

use std::path::PathBuf;

/// Environment variable naming the database, `sqlite:///path` or a bare path.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
/// Environment variable carrying the shared gate secret.
pub const GATE_SECRET_ENV: &str = "BIOTRACKER_SECRET";

const DEFAULT_DATABASE_FILE: &str = "./biotracker.db";

/// Where the tracker stores its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    /// Embedded local store at the given path.
    File(PathBuf),
    /// Volatile store, used by tests and smoke probes.
    InMemory,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database: DatabaseTarget,
    /// Shared secret for the external request gate, when configured.
    pub shared_secret: Option<String>,
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// An unset or empty `DATABASE_URL` selects the embedded local store.
    pub fn from_env() -> Self {
        let database = match std::env::var(DATABASE_URL_ENV) {
            Ok(raw) if !raw.trim().is_empty() => parse_database_url(&raw),
            _ => DatabaseTarget::File(PathBuf::from(DEFAULT_DATABASE_FILE)),
        };
        let shared_secret = std::env::var(GATE_SECRET_ENV)
            .ok()
            .filter(|secret| !secret.is_empty());

        Self {
            database,
            shared_secret,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseTarget::File(PathBuf::from(DEFAULT_DATABASE_FILE)),
            shared_secret: None,
        }
    }
}

/// Interprets a database URL or path.
///
/// Recognized shapes: `sqlite:///relative/or/absolute/path`, `sqlite::memory:`,
/// `:memory:`, and bare filesystem paths.
fn parse_database_url(raw: &str) -> DatabaseTarget {
    let trimmed = raw.trim();
    if trimmed == ":memory:" || trimmed == "sqlite::memory:" {
        return DatabaseTarget::InMemory;
    }
    let path = trimmed.strip_prefix("sqlite:///").unwrap_or(trimmed);
    DatabaseTarget::File(PathBuf::from(path))
}
