//! Domain model for the compound catalog and administration log.
//!
//! # Responsibility
//! - Define the canonical records persisted by the repository layer.
//! - Enforce field-level invariants before anything reaches storage.
//!
//! # Invariants
//! - Every record is identified by a stable, system-assigned UUID.
//! - Records are immutable after creation; there is no update path.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod compound;
pub mod log_entry;
pub mod timestamp;

/// Field-level validation failure for catalog or log input.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidParameter {
    EmptyName,
    EmptyCompoundName,
    NonPositiveHalfLife(f64),
    NegativeThreshold(f64),
    NegativeTimeToPeak(f64),
    NegativeDose(f64),
    NonFiniteValue(&'static str),
}

impl Display for InvalidParameter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "compound name must not be empty"),
            Self::EmptyCompoundName => {
                write!(f, "log entry compound name must not be empty")
            }
            Self::NonPositiveHalfLife(value) => {
                write!(f, "half_life_hours must be positive, got {value}")
            }
            Self::NegativeThreshold(value) => {
                write!(f, "min_threshold must not be negative, got {value}")
            }
            Self::NegativeTimeToPeak(value) => {
                write!(f, "time_to_peak_hours must not be negative, got {value}")
            }
            Self::NegativeDose(value) => {
                write!(f, "dose_amount must not be negative, got {value}")
            }
            Self::NonFiniteValue(field) => write!(f, "{field} must be a finite number"),
        }
    }
}

impl Error for InvalidParameter {}
