//! Administration log use-case service.
//!
//! # Responsibility
//! - Record and list dosing events.
//! - Parse caller-supplied timestamps for backdated entries.
//!
//! # Invariants
//! - A malformed timestamp fails the request with `InvalidTimestamp`;
//!   "now" is used only when no timestamp was supplied at all.
//! - `compound_name` is accepted as written; the catalog is not consulted.

use crate::model::log_entry::{LogEntry, LogEntryId};
use crate::model::timestamp::{now_local, parse_dose_timestamp};
use crate::repo::log_repo::LogRepository;
use crate::service::{TrackerError, TrackerResult};
use log::info;

/// Request model for recording one administration event.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDoseRequest {
    pub compound_name: String,
    pub dose_amount: f64,
    /// Optional backdated timestamp, `YYYY-MM-DD HH:MM[:SS]`.
    pub timestamp: Option<String>,
}

/// Use-case service wrapper for dose log operations.
pub struct DoseLogService<R: LogRepository> {
    repo: R,
}

impl<R: LogRepository> DoseLogService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all entries, most recent first, ties in insertion order.
    pub fn history(&self) -> TrackerResult<Vec<LogEntry>> {
        Ok(self.repo.list_entries()?)
    }

    /// Records a dose and returns the created entry.
    ///
    /// # Errors
    /// - `InvalidTimestamp` for an unparsable caller-supplied timestamp.
    /// - `InvalidParameter` for a negative or non-finite dose.
    pub fn record(&self, request: &RecordDoseRequest) -> TrackerResult<LogEntry> {
        let timestamp = match &request.timestamp {
            Some(raw) => parse_dose_timestamp(raw)?,
            None => now_local(),
        };

        let entry = LogEntry::new(request.compound_name.clone(), request.dose_amount, timestamp);
        self.repo.insert_entry(&entry)?;
        info!(
            "event=log_record module=service status=ok compound={} dose={}",
            entry.compound_name, entry.dose_amount
        );
        Ok(entry)
    }

    /// Removes one entry by ID.
    ///
    /// # Errors
    /// - `NotFound` when no entry has that ID.
    pub fn remove(&self, id: LogEntryId) -> TrackerResult<()> {
        self.repo.delete_entry(id).map_err(TrackerError::from)?;
        info!("event=log_remove module=service status=ok id={id}");
        Ok(())
    }
}
