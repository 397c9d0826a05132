//! Display formatting for canonical score values, matching the strings the
//! parser itself emits on the way in.

use crate::domain::{TiebreakScheme, WorkoutScheme};
use crate::encoding::{self, CANONICAL_ROUNDS_FACTOR, LoadUnit};
use crate::parser::time;

/// Render a canonical value the way a leaderboard cell shows it.
pub fn format_canonical(value: i64, scheme: WorkoutScheme, load_unit: LoadUnit) -> String {
    match scheme {
        WorkoutScheme::Time | WorkoutScheme::TimeWithCap | WorkoutScheme::Emom => {
            time::format_ms(value)
        }
        WorkoutScheme::RoundsReps => {
            let rounds = value / CANONICAL_ROUNDS_FACTOR;
            let reps = value % CANONICAL_ROUNDS_FACTOR;
            if rounds > 0 {
                format!("{rounds}+{reps}")
            } else {
                // Bare rep totals are stored in the reps field only.
                format!("{reps} reps")
            }
        }
        WorkoutScheme::Reps => format!("{value} reps"),
        WorkoutScheme::Calories => format!("{value} cal"),
        WorkoutScheme::Points => format!("{value} pts"),
        WorkoutScheme::Load => {
            let units = (value as f64 / load_unit.grams_per_unit()).round() as i64;
            format!("{units} {}", load_unit.as_str())
        }
        WorkoutScheme::Meters => {
            let meters = (value as f64 / encoding::mm_per_unit(scheme)).round() as i64;
            format!("{meters}m")
        }
        WorkoutScheme::Feet => {
            let feet = (value as f64 / encoding::mm_per_unit(scheme)).round() as i64;
            format!("{feet}ft")
        }
        WorkoutScheme::PassFail => {
            if value != 0 {
                "Pass".to_string()
            } else {
                "Fail".to_string()
            }
        }
    }
}

/// Render a points value for display: one decimal place, with an explicit
/// `+` on positive values. Signed point totals come out of P-Score, where
/// the sign carries meaning (better or worse than the reference median).
/// Only the display is rounded; ranking and summation keep the full value.
pub fn format_points(points: f64) -> String {
    let rounded = (points * 10.0).round() / 10.0;
    if rounded > 0.0 {
        format!("+{rounded:.1}")
    } else if rounded < 0.0 {
        format!("{rounded:.1}")
    } else {
        "0.0".to_string()
    }
}

/// Render a tiebreak value alone. Time tiebreaks keep millisecond precision.
pub fn format_tiebreak(value: i64, scheme: TiebreakScheme) -> String {
    match scheme {
        TiebreakScheme::Time => time::format_ms_precise(value),
        TiebreakScheme::Reps => value.to_string(),
    }
}

/// `"12:34 (TB: 150)"` — the combined leaderboard cell.
pub fn format_with_tiebreak(
    formatted_score: &str,
    tiebreak_value: i64,
    scheme: TiebreakScheme,
) -> String {
    format!(
        "{formatted_score} (TB: {})",
        format_tiebreak(tiebreak_value, scheme)
    )
}
