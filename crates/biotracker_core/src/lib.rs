//! Core domain logic for the biotracker compound/dose tracker.
//! This crate is the single source of truth for business invariants.

pub mod config;
pub mod db;
pub mod kinetics;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{Config, DatabaseTarget};
pub use kinetics::{ActiveEstimate, ActivityStatus};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::compound::{Compound, CompoundId};
pub use model::log_entry::{LogEntry, LogEntryId};
pub use model::timestamp::{parse_dose_timestamp, TimestampParseError};
pub use model::InvalidParameter;
pub use repo::compound_repo::{CompoundRepository, SqliteCompoundRepository};
pub use repo::log_repo::{LogRepository, SqliteLogRepository};
pub use repo::{RepoError, RepoResult};
pub use service::catalog_service::{CatalogService, NewCompound};
pub use service::estimate_service::EstimateService;
pub use service::log_service::{DoseLogService, RecordDoseRequest};
pub use service::{TrackerError, TrackerResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
