//! Placement-based scoring: fixed points per rank, stepping down from
//! first place.

use crate::config::TraditionalSettings;

/// Points for a 1-indexed rank. Never goes below zero.
pub fn points_for_rank(rank: u32, settings: &TraditionalSettings) -> f64 {
    (settings.first_place_points - settings.step * (rank as f64 - 1.0)).max(0.0)
}
