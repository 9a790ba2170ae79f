//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep presentation layers decoupled from storage details.
//!
//! # Invariants
//! - Service APIs never bypass repository validation contracts.
//! - Input failures surface as typed errors; nothing is silently
//!   substituted or retried.

use crate::model::timestamp::TimestampParseError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod catalog_service;
pub mod estimate_service;
pub mod log_service;

pub type TrackerResult<T> = Result<T, TrackerError>;

/// Caller-facing error for every core use case.
#[derive(Debug)]
pub enum TrackerError {
    Repo(RepoError),
    /// Caller-supplied timestamp could not be parsed.
    InvalidTimestamp(TimestampParseError),
    /// Estimate requested for a name absent from the catalog.
    UnknownCompound(String),
}

impl Display for TrackerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::InvalidTimestamp(err) => write!(f, "{err}"),
            Self::UnknownCompound(name) => {
                write!(f, "compound `{name}` is not in the catalog")
            }
        }
    }
}

impl Error for TrackerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::InvalidTimestamp(err) => Some(err),
            Self::UnknownCompound(_) => None,
        }
    }
}

impl From<RepoError> for TrackerError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<TimestampParseError> for TrackerError {
    fn from(value: TimestampParseError) -> Self {
        Self::InvalidTimestamp(value)
    }
}
