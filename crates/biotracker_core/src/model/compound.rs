//! Compound catalog domain model.
//!
//! # Responsibility
//! - Define the pharmacokinetic parameter record for one trackable substance.
//! - Validate parameter ranges before persistence.
//!
//! # Invariants
//! - `name` uniquely identifies a compound within the catalog (enforced by
//!   storage); it is case-sensitive and never empty.
//! - `half_life_hours` is strictly positive; `min_threshold` and
//!   `time_to_peak_hours` are non-negative.

use crate::model::InvalidParameter;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a catalog entry.
pub type CompoundId = Uuid;

/// One trackable substance with its decay kinetics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compound {
    /// Stable ID used for deletion; the human-facing key is `name`.
    pub id: CompoundId,
    /// Unique, case-sensitive catalog key.
    pub name: String,
    /// Time for the active amount to fall by half.
    pub half_life_hours: f64,
    /// Free-text classification label (e.g. "Peptide", "GLP-1").
    pub category: String,
    /// Minimum amount still considered pharmacologically active.
    pub min_threshold: f64,
    /// Time from administration to peak absorption. Zero means the full
    /// dose is available immediately.
    pub time_to_peak_hours: f64,
}

impl Compound {
    /// Creates a compound with a generated stable ID.
    pub fn new(
        name: impl Into<String>,
        half_life_hours: f64,
        category: impl Into<String>,
        min_threshold: f64,
        time_to_peak_hours: f64,
    ) -> Self {
        Self::with_id(
            Uuid::new_v4(),
            name,
            half_life_hours,
            category,
            min_threshold,
            time_to_peak_hours,
        )
    }

    /// Creates a compound with a caller-provided stable ID.
    ///
    /// Used when rehydrating persisted rows where identity already exists.
    pub fn with_id(
        id: CompoundId,
        name: impl Into<String>,
        half_life_hours: f64,
        category: impl Into<String>,
        min_threshold: f64,
        time_to_peak_hours: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            half_life_hours,
            category: category.into(),
            min_threshold,
            time_to_peak_hours,
        }
    }

    /// Checks all field-level invariants.
    ///
    /// # Errors
    /// - `EmptyName` for a blank name.
    /// - `NonPositiveHalfLife` when `half_life_hours <= 0`.
    /// - `NegativeThreshold` / `NegativeTimeToPeak` for negative values.
    /// - `NonFiniteValue` when any numeric field is NaN or infinite.
    pub fn validate(&self) -> Result<(), InvalidParameter> {
        if self.name.trim().is_empty() {
            return Err(InvalidParameter::EmptyName);
        }
        if !self.half_life_hours.is_finite() {
            return Err(InvalidParameter::NonFiniteValue("half_life_hours"));
        }
        if self.half_life_hours <= 0.0 {
            return Err(InvalidParameter::NonPositiveHalfLife(self.half_life_hours));
        }
        if !self.min_threshold.is_finite() {
            return Err(InvalidParameter::NonFiniteValue("min_threshold"));
        }
        if self.min_threshold < 0.0 {
            return Err(InvalidParameter::NegativeThreshold(self.min_threshold));
        }
        if !self.time_to_peak_hours.is_finite() {
            return Err(InvalidParameter::NonFiniteValue("time_to_peak_hours"));
        }
        if self.time_to_peak_hours < 0.0 {
            return Err(InvalidParameter::NegativeTimeToPeak(self.time_to_peak_hours));
        }
        Ok(())
    }
}
