//! Event scoring: status policy, ranking, and the algorithm dispatcher.
//!
//! The pipeline is fixed: split the field by status, sort the active
//! entries by performance, assign competition ranks (ties share a rank,
//! the next rank skips), hand ranks to the configured algorithm, then
//! append the non-performing athletes per the status policy.

pub mod custom;
pub mod p_score;
pub mod traditional;
pub mod types;

pub use types::EventPoints;

use log::debug;
use std::cmp::Ordering;

use crate::config::{Algorithm, InactiveHandling, ScoringConfig};
use crate::domain::{FieldEntry, ScoreStatus, TiebreakScheme, WorkoutScheme};
use crate::tiebreak;

/// Score one event's field. Returns active athletes in rank order followed
/// by ranked-in inactive athletes in input order; excluded athletes are
/// absent from the result.
pub fn score_event(
    entries: &[FieldEntry],
    scheme: WorkoutScheme,
    tiebreak_scheme: Option<TiebreakScheme>,
    config: &ScoringConfig,
) -> Vec<EventPoints> {
    if entries.is_empty() {
        return Vec::new();
    }

    let (active, inactive): (Vec<&FieldEntry>, Vec<&FieldEntry>) =
        entries.iter().partition(|e| e.status.is_active());

    let mut sorted_active = active;
    sorted_active.sort_by(|a, b| compare_entries(a, b, scheme, tiebreak_scheme));
    let ranks = assign_ranks(&sorted_active, scheme, tiebreak_scheme);

    debug!(
        "Scoring field: {} active, {} inactive, algorithm={}",
        sorted_active.len(),
        inactive.len(),
        config.algorithm.name()
    );

    let active_points: Vec<f64> = match &config.algorithm {
        Algorithm::Traditional(settings) => ranks
            .iter()
            .map(|&rank| traditional::points_for_rank(rank, settings))
            .collect(),
        Algorithm::Custom {
            table,
            traditional: traditional_settings,
        } => ranks
            .iter()
            .map(|&rank| custom::points_for_rank(rank, table, traditional_settings))
            .collect(),
        Algorithm::PScore(settings) => {
            let values: Vec<f64> = sorted_active
                .iter()
                .map(|e| entry_value(e) as f64)
                .collect();
            p_score::score_active(&values, scheme.is_ascending(), settings)
        }
    };

    let mut results: Vec<EventPoints> = sorted_active
        .iter()
        .zip(&ranks)
        .zip(&active_points)
        .map(|((entry, &rank), &points)| EventPoints {
            registration_id: entry.registration_id.clone(),
            rank,
            points,
        })
        .collect();

    let next_rank = ranks.last().copied().unwrap_or(0) + 1;
    for entry in inactive {
        let handling = match entry.status {
            ScoreStatus::Dnf => config.status_handling.dnf,
            ScoreStatus::Dns => config.status_handling.dns,
            ScoreStatus::Withdrawn => config.status_handling.withdrawn,
            // Active statuses were partitioned out above.
            ScoreStatus::Scored | ScoreStatus::Cap => continue,
        };
        let points = match handling {
            InactiveHandling::Exclude => continue,
            InactiveHandling::Zero => 0.0,
            InactiveHandling::LastPlace => last_place_points(next_rank, &active_points, config),
        };
        results.push(EventPoints {
            registration_id: entry.registration_id.clone(),
            rank: next_rank,
            points,
        });
    }

    results
}

/// Points for the rank just past the active field.
fn last_place_points(rank: u32, active_points: &[f64], config: &ScoringConfig) -> f64 {
    match &config.algorithm {
        Algorithm::Traditional(settings) => traditional::points_for_rank(rank, settings),
        Algorithm::Custom {
            table,
            traditional: traditional_settings,
        } => custom::points_for_rank(rank, table, traditional_settings),
        // P-Score is value-based; a rank alone has no formula input. The
        // worst active score is the field's floor.
        Algorithm::PScore(_) => active_points.last().copied().unwrap_or(0.0),
    }
}

/// Performance order for two active entries. Capped athletes sort after
/// everyone who finished under a time cap; equal values fall through to
/// the tiebreak resolver.
fn compare_entries(
    a: &FieldEntry,
    b: &FieldEntry,
    scheme: WorkoutScheme,
    tiebreak_scheme: Option<TiebreakScheme>,
) -> Ordering {
    if scheme == WorkoutScheme::TimeWithCap {
        let cap_order = is_cap(a).cmp(&is_cap(b));
        if cap_order != Ordering::Equal {
            return cap_order;
        }
    }

    let (a_value, b_value) = (entry_value(a), entry_value(b));
    let value_order = if scheme.is_ascending() {
        a_value.cmp(&b_value)
    } else {
        b_value.cmp(&a_value)
    };
    if value_order != Ordering::Equal {
        return value_order;
    }

    match tiebreak_scheme {
        Some(tb) => tiebreak::compare(a.tiebreak_value, b.tiebreak_value, tb),
        None => Ordering::Equal,
    }
}

/// Competition ranking over a sorted field: entries that compare equal to
/// their predecessor share its rank, the next distinct entry takes its
/// positional rank.
fn assign_ranks(
    sorted: &[&FieldEntry],
    scheme: WorkoutScheme,
    tiebreak_scheme: Option<TiebreakScheme>,
) -> Vec<u32> {
    let mut ranks = Vec::with_capacity(sorted.len());
    for i in 0..sorted.len() {
        if i > 0
            && compare_entries(sorted[i - 1], sorted[i], scheme, tiebreak_scheme)
                == Ordering::Equal
        {
            let previous = ranks[i - 1];
            ranks.push(previous);
        } else {
            ranks.push(i as u32 + 1);
        }
    }
    ranks
}

fn is_cap(entry: &FieldEntry) -> bool {
    entry.status == ScoreStatus::Cap
}

fn entry_value(entry: &FieldEntry) -> i64 {
    entry.value.unwrap_or(0)
}

/// Whether a score sits more than two standard deviations from the
/// division mean. Fields under three scores never flag.
pub fn is_outlier(value: f64, division_values: &[f64]) -> bool {
    if division_values.len() < 3 {
        return false;
    }
    let n = division_values.len() as f64;
    let mean = division_values.iter().sum::<f64>() / n;
    let variance = division_values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (value - mean).abs() > 2.0 * variance.sqrt()
}
