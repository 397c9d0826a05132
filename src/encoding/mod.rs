//! Bidirectional conversion between the legacy score encoding (seconds,
//! raw pounds, raw meters/feet, `rounds*1000 + reps`) and the canonical
//! encoding used by the scoring engine (milliseconds, grams, millimeters,
//! `rounds*100_000 + reps`).
//!
//! Both directions are pure and total over every value the score parser can
//! produce: `to_legacy(to_canonical(v)) == v` always holds for such values.

use serde::{Deserialize, Serialize};

use crate::domain::WorkoutScheme;

pub const MS_PER_SECOND: i64 = 1000;
pub const CANONICAL_ROUNDS_FACTOR: i64 = 100_000;
pub const LEGACY_ROUNDS_FACTOR: i64 = 1000;

/// Legacy unit of a load score. Owns the grams-per-unit conversion table so
/// the constant is never repeated at call sites.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadUnit {
    #[default]
    Lbs,
    Kg,
}

impl LoadUnit {
    pub fn grams_per_unit(&self) -> f64 {
        match self {
            LoadUnit::Lbs => 453.592,
            LoadUnit::Kg => 1000.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LoadUnit::Lbs => "lbs",
            LoadUnit::Kg => "kg",
        }
    }
}

/// Millimeters per legacy distance unit, keyed by scheme.
pub fn mm_per_unit(scheme: WorkoutScheme) -> f64 {
    match scheme {
        WorkoutScheme::Meters => 1000.0,
        WorkoutScheme::Feet => 304.8,
        // Not a linear-distance scheme; identity in both encodings.
        _ => 1.0,
    }
}

/// Convert a legacy-encoded value to the canonical encoding.
pub fn to_canonical(value: i64, scheme: WorkoutScheme) -> i64 {
    match scheme {
        WorkoutScheme::Time | WorkoutScheme::TimeWithCap | WorkoutScheme::Emom => {
            value * MS_PER_SECOND
        }
        WorkoutScheme::RoundsReps => {
            let rounds = value / LEGACY_ROUNDS_FACTOR;
            let reps = value % LEGACY_ROUNDS_FACTOR;
            rounds * CANONICAL_ROUNDS_FACTOR + reps
        }
        WorkoutScheme::Load => (value as f64 * LoadUnit::Lbs.grams_per_unit()).round() as i64,
        WorkoutScheme::Meters | WorkoutScheme::Feet => {
            (value as f64 * mm_per_unit(scheme)).round() as i64
        }
        WorkoutScheme::Reps
        | WorkoutScheme::Calories
        | WorkoutScheme::Points
        | WorkoutScheme::PassFail => value,
    }
}

/// Convert a canonical value back to the legacy encoding.
///
/// Unit conversions divide with rounding rather than truncation: a value
/// like 225 lbs canonicalizes to 102_058 g, and truncating division would
/// hand back 224.
pub fn to_legacy(value: i64, scheme: WorkoutScheme) -> i64 {
    match scheme {
        WorkoutScheme::Time | WorkoutScheme::TimeWithCap | WorkoutScheme::Emom => {
            value / MS_PER_SECOND
        }
        WorkoutScheme::RoundsReps => {
            let rounds = value / CANONICAL_ROUNDS_FACTOR;
            let reps = value % CANONICAL_ROUNDS_FACTOR;
            rounds * LEGACY_ROUNDS_FACTOR + reps
        }
        WorkoutScheme::Load => (value as f64 / LoadUnit::Lbs.grams_per_unit()).round() as i64,
        WorkoutScheme::Meters | WorkoutScheme::Feet => {
            (value as f64 / mm_per_unit(scheme)).round() as i64
        }
        WorkoutScheme::Reps
        | WorkoutScheme::Calories
        | WorkoutScheme::Points
        | WorkoutScheme::PassFail => value,
    }
}

/// Older stored data also carries rounds-reps as a fractional number
/// (`rounds + reps/100`, so 5+12 is 5.12). This is a distinct legacy form
/// and must never be confused with the integer-packed one.
pub fn fractional_to_canonical(value: f64) -> i64 {
    let rounds = value.trunc() as i64;
    let reps = ((value - value.trunc()) * 100.0).round() as i64;
    rounds * CANONICAL_ROUNDS_FACTOR + reps
}

/// Inverse of [`fractional_to_canonical`].
pub fn canonical_to_fractional(value: i64) -> f64 {
    let rounds = value / CANONICAL_ROUNDS_FACTOR;
    let reps = value % CANONICAL_ROUNDS_FACTOR;
    rounds as f64 + reps as f64 / 100.0
}
