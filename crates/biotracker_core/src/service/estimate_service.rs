//! Active-concentration estimation use case.
//!
//! # Responsibility
//! - Resolve a compound by name, fetch its relevant dose history, and
//!   delegate to the pure kinetics functions.
//!
//! # Invariants
//! - Only entries with `timestamp <= at_time` enter the estimate.
//! - The service holds no state between calls.

use crate::kinetics::{self, ActiveEstimate};
use crate::repo::compound_repo::CompoundRepository;
use crate::repo::log_repo::LogRepository;
use crate::service::{TrackerError, TrackerResult};
use chrono::NaiveDateTime;

/// Use-case service computing still-active amounts from the dose history.
pub struct EstimateService<C: CompoundRepository, L: LogRepository> {
    compounds: C,
    logs: L,
}

impl<C: CompoundRepository, L: LogRepository> EstimateService<C, L> {
    /// Creates a service over the two repositories it reads from.
    pub fn new(compounds: C, logs: L) -> Self {
        Self { compounds, logs }
    }

    /// Estimates the still-active amount of `compound_name` at `at_time`.
    ///
    /// # Errors
    /// - `UnknownCompound` when the name is not in the catalog; kinetic
    ///   parameters are required to estimate, even though the log itself
    ///   accepts unknown names.
    pub fn estimate_active(
        &self,
        compound_name: &str,
        at_time: NaiveDateTime,
    ) -> TrackerResult<ActiveEstimate> {
        let compound = self
            .compounds
            .find_by_name(compound_name)?
            .ok_or_else(|| TrackerError::UnknownCompound(compound_name.to_string()))?;

        let entries = self.logs.entries_for_compound_until(compound_name, at_time)?;
        Ok(kinetics::estimate(&compound, &entries, at_time))
    }
}
