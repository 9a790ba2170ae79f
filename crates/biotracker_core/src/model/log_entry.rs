//! Administration log domain model.
//!
//! # Responsibility
//! - Define one recorded dosing event.
//!
//! # Invariants
//! - Entries are immutable once created; correction means delete + re-add.
//! - `compound_name` is a soft reference: it is not required to match a
//!   catalog entry, so history survives compound deletion.

use crate::model::InvalidParameter;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a log entry.
pub type LogEntryId = Uuid;

/// One recorded administration event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: LogEntryId,
    /// Soft reference to a compound by name; never FK-enforced.
    pub compound_name: String,
    /// Administered quantity in the compound's unit (typically mcg).
    pub dose_amount: f64,
    /// Local-time instant of administration; naive, never zone-converted.
    pub timestamp: NaiveDateTime,
}

impl LogEntry {
    /// Creates an entry with a generated stable ID.
    pub fn new(
        compound_name: impl Into<String>,
        dose_amount: f64,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), compound_name, dose_amount, timestamp)
    }

    /// Creates an entry with a caller-provided stable ID.
    pub fn with_id(
        id: LogEntryId,
        compound_name: impl Into<String>,
        dose_amount: f64,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            compound_name: compound_name.into(),
            dose_amount,
            timestamp,
        }
    }

    /// Checks all field-level invariants.
    ///
    /// # Errors
    /// - `EmptyCompoundName` for a blank compound reference.
    /// - `NegativeDose` when `dose_amount < 0`.
    /// - `NonFiniteValue` when `dose_amount` is NaN or infinite.
    pub fn validate(&self) -> Result<(), InvalidParameter> {
        if self.compound_name.trim().is_empty() {
            return Err(InvalidParameter::EmptyCompoundName);
        }
        if !self.dose_amount.is_finite() {
            return Err(InvalidParameter::NonFiniteValue("dose_amount"));
        }
        if self.dose_amount < 0.0 {
            return Err(InvalidParameter::NegativeDose(self.dose_amount));
        }
        Ok(())
    }
}
