//! Dose timestamp parsing and storage encoding.
//!
//! # Responsibility
//! - Parse caller-supplied date-times for backdated log entries.
//! - Encode/decode timestamps for integer storage columns.
//!
//! # Invariants
//! - Timestamps are naive local-time instants end to end. A trailing zone
//!   designator on input is stripped, not converted; the wall-clock digits
//!   are taken as written.
//! - Malformed input is a hard error. The log layer never substitutes
//!   "now" for an unparsable timestamp.

use chrono::{DateTime, Local, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Trailing zone designators tolerated on input: `Z`, `+HH:MM`, `+HHMM`, `+HH`.
static ZONE_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:[Zz]|[+-]\d{2}:\d{2}|[+-]\d{4}|[+-]\d{2})$").expect("valid regex"));

/// Accepted date-time shapes, seconds optional, space or `T` separator.
const ACCEPTED_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Failure to interpret a caller-supplied timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampParseError {
    Empty,
    Unparsable(String),
}

impl Display for TimestampParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "timestamp must not be empty"),
            Self::Unparsable(raw) => write!(
                f,
                "timestamp `{raw}` is not a valid `YYYY-MM-DD HH:MM[:SS]` date-time"
            ),
        }
    }
}

impl Error for TimestampParseError {}

/// Parses a caller-supplied dose timestamp.
///
/// Accepts `YYYY-MM-DD HH:MM[:SS]` with either a space or `T` separator.
/// A trailing zone designator is stripped and the remaining digits are read
/// as local wall-clock time.
pub fn parse_dose_timestamp(raw: &str) -> Result<NaiveDateTime, TimestampParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TimestampParseError::Empty);
    }

    let stripped = ZONE_SUFFIX.replace(trimmed, "");
    let candidate = stripped.trim_end();

    for format in ACCEPTED_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(candidate, format) {
            return Ok(parsed);
        }
    }

    Err(TimestampParseError::Unparsable(raw.to_string()))
}

/// Current local wall-clock time, used when no timestamp is supplied.
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Encodes a naive timestamp as integer milliseconds for storage.
///
/// This is a fixed bijection, not a zone conversion; the same pairing is
/// used on the way back out.
pub fn to_storage_millis(timestamp: NaiveDateTime) -> i64 {
    timestamp.and_utc().timestamp_millis()
}

/// Decodes a stored millisecond value back into a naive timestamp.
///
/// Returns `None` for values outside the representable range.
pub fn from_storage_millis(millis: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(millis).map(|instant| instant.naive_utc())
}
