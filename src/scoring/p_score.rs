//! P-Score: points as a signed distance from the reference median.
//!
//! Best performance scores 100, the reference median scores 50, and every
//! point of spread between them is worth the same below the median, so a
//! blowout win is rewarded proportionally. Values are kept as unrounded
//! `f64`; display rounding happens at the presentation edge.

use crate::config::{MedianField, PScoreSettings};

/// Score a sorted active field (best first). Returns one point value per
/// input position, parallel to `sorted_values`.
pub fn score_active(
    sorted_values: &[f64],
    ascending: bool,
    settings: &PScoreSettings,
) -> Vec<f64> {
    if sorted_values.is_empty() {
        return Vec::new();
    }

    let best = sorted_values[0];
    let median = reference_median(sorted_values, settings.median_field);

    sorted_values
        .iter()
        .map(|&value| {
            let raw = formula(value, best, median, ascending);
            if settings.allow_negatives {
                raw
            } else {
                raw.max(0.0)
            }
        })
        .collect()
}

fn formula(value: f64, best: f64, median: f64, ascending: bool) -> f64 {
    let spread = if ascending {
        median - best
    } else {
        best - median
    };
    if spread == 0.0 {
        // Degenerate field: everyone at the best value scores 100, anyone
        // behind it scores 0.
        return if value == best { 100.0 } else { 0.0 };
    }
    let distance = if ascending {
        value - best
    } else {
        best - value
    };
    100.0 - distance * (50.0 / spread)
}

/// Reference median of the sorted active field.
///
/// `TopHalf` takes the value of the boundary athlete closing out the top
/// half (index `ceil(n/2) - 1`); `All` is the true median of the field.
fn reference_median(sorted_values: &[f64], field: MedianField) -> f64 {
    let n = sorted_values.len();
    match field {
        MedianField::TopHalf => sorted_values[(n - 1) / 2],
        MedianField::All => {
            if n % 2 == 1 {
                sorted_values[n / 2]
            } else {
                (sorted_values[n / 2 - 1] + sorted_values[n / 2]) / 2.0
            }
        }
    }
}
