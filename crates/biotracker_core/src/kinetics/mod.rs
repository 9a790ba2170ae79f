//! Single-compartment decay estimation over the dose history.
//!
//! # Responsibility
//! - Compute the still-active amount of a compound at a query instant by
//!   superposition of every administered dose's decayed remainder.
//!
//! # Contract
//! - Elimination: `remaining = dose * 2^(-elapsed_hours / half_life_hours)`.
//! - Absorption: when `time_to_peak_hours` is zero the peak is
//!   instantaneous and decay starts at dosing time. Otherwise the
//!   contribution ramps linearly from zero at dosing to the full dose at
//!   the peak, then decays exponentially with elapsed time measured from
//!   the peak.
//! - Doses administered after the query instant contribute nothing.
//! - Status is `Active` iff the summed amount is positive and at or above
//!   `min_threshold`; an empty history is `Depleted` even at threshold
//!   zero.
//!
//! Everything here is a pure function of its arguments; fetching the dose
//! history is the caller's job.

use crate::model::compound::Compound;
use crate::model::log_entry::LogEntry;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Re-dosing readiness relative to the compound's threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    /// Estimated amount is positive and at or above `min_threshold`.
    Active,
    /// Estimated amount is below `min_threshold`, or nothing was dosed.
    Depleted,
}

/// Result of an on-demand concentration estimate. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveEstimate {
    pub amount: f64,
    pub status: ActivityStatus,
}

/// Fraction of a dose remaining after `elapsed_hours` of elimination.
///
/// Non-positive elapsed time means no elimination has happened yet.
pub fn remaining_fraction(elapsed_hours: f64, half_life_hours: f64) -> f64 {
    if !half_life_hours.is_finite() || half_life_hours <= 0.0 {
        return 0.0;
    }
    if elapsed_hours <= 0.0 {
        return 1.0;
    }
    0.5_f64.powf(elapsed_hours / half_life_hours)
}

/// Active amount contributed by one dose `elapsed_hours` after administration.
///
/// Applies the absorption contract above, then exponential elimination.
pub fn dose_contribution(
    dose: f64,
    elapsed_hours: f64,
    half_life_hours: f64,
    time_to_peak_hours: f64,
) -> f64 {
    if elapsed_hours < 0.0 {
        return 0.0;
    }
    if time_to_peak_hours > 0.0 {
        if elapsed_hours < time_to_peak_hours {
            return dose * elapsed_hours / time_to_peak_hours;
        }
        return dose * remaining_fraction(elapsed_hours - time_to_peak_hours, half_life_hours);
    }
    dose * remaining_fraction(elapsed_hours, half_life_hours)
}

/// Estimates the still-active amount of `compound` at `at_time`.
///
/// Entries for other compounds or administered after `at_time` are
/// ignored, so callers may pass an unfiltered history.
pub fn estimate(compound: &Compound, entries: &[LogEntry], at_time: NaiveDateTime) -> ActiveEstimate {
    let mut amount = 0.0;

    for entry in entries {
        if entry.compound_name != compound.name || entry.timestamp > at_time {
            continue;
        }
        let elapsed_hours =
            (at_time - entry.timestamp).num_milliseconds() as f64 / MILLIS_PER_HOUR;
        amount += dose_contribution(
            entry.dose_amount,
            elapsed_hours,
            compound.half_life_hours,
            compound.time_to_peak_hours,
        );
    }

    let status = if amount > 0.0 && amount >= compound.min_threshold {
        ActivityStatus::Active
    } else {
        ActivityStatus::Depleted
    };

    ActiveEstimate { amount, status }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn no_elimination_at_zero_elapsed() {
        assert!((remaining_fraction(0.0, 4.0) - 1.0).abs() < EPS);
    }

    #[test]
    fn half_remains_after_one_half_life() {
        assert!((remaining_fraction(4.0, 4.0) - 0.5).abs() < EPS);
    }

    #[test]
    fn quarter_remains_after_two_half_lives() {
        assert!((remaining_fraction(8.0, 4.0) - 0.25).abs() < EPS);
    }

    #[test]
    fn fraction_is_strictly_decreasing_in_elapsed_time() {
        let mut previous = remaining_fraction(0.0, 6.0);
        for step in 1..50 {
            let current = remaining_fraction(step as f64 * 0.5, 6.0);
            assert!(current < previous, "not decreasing at step {step}");
            previous = current;
        }
    }

    #[test]
    fn degenerate_half_life_contributes_nothing() {
        assert_eq!(remaining_fraction(1.0, 0.0), 0.0);
        assert_eq!(remaining_fraction(1.0, -3.0), 0.0);
        assert_eq!(remaining_fraction(1.0, f64::NAN), 0.0);
    }

    #[test]
    fn instantaneous_peak_decays_from_dosing_time() {
        assert!((dose_contribution(100.0, 0.0, 4.0, 0.0) - 100.0).abs() < EPS);
        assert!((dose_contribution(100.0, 4.0, 4.0, 0.0) - 50.0).abs() < EPS);
    }

    #[test]
    fn linear_ramp_reaches_full_dose_at_peak() {
        assert!((dose_contribution(100.0, 0.0, 4.0, 2.0) - 0.0).abs() < EPS);
        assert!((dose_contribution(100.0, 1.0, 4.0, 2.0) - 50.0).abs() < EPS);
        assert!((dose_contribution(100.0, 2.0, 4.0, 2.0) - 100.0).abs() < EPS);
    }

    #[test]
    fn decay_after_peak_is_measured_from_the_peak() {
        // Peak at 2h, one half-life later (6h elapsed) half the dose remains.
        assert!((dose_contribution(100.0, 6.0, 4.0, 2.0) - 50.0).abs() < EPS);
    }

    #[test]
    fn future_doses_contribute_nothing() {
        assert_eq!(dose_contribution(100.0, -1.0, 4.0, 0.0), 0.0);
    }
}
