//! Leaderboard Aggregator: event points rolled up into per-division
//! standings with overall ranks.
//!
//! The leaderboard is derived state. It is recomputed from the stored
//! scores and config on every call and never persisted, so identical
//! inputs always reproduce identical output.

pub mod tiebreakers;

pub use tiebreakers::{OverallStanding, RankedStanding, apply_tiebreakers};

use log::{debug, info};
use std::collections::HashMap;

use crate::config::{Algorithm, InactiveHandling, ScoringConfig};
use crate::domain::{
    EventResult, FieldEntry, LeaderboardEntry, ScoreStatus, ScoredEvent,
};
use crate::encoding::LoadUnit;
use crate::parser::format;
use crate::parser::time;
use crate::scoring;

/// Compute the full leaderboard across all events. Each division is scored
/// and ranked independently; the result is ordered by division, then by
/// overall rank, with input order preserved inside unresolved ties.
pub fn compute_leaderboard(
    events: &[ScoredEvent],
    config: &ScoringConfig,
) -> Vec<LeaderboardEntry> {
    let roster = build_roster(events, config);
    info!(
        "Computing leaderboard: {} events, {} athletes",
        events.len(),
        roster.len()
    );

    let mut entries: Vec<LeaderboardEntry> = roster
        .iter()
        .map(|(registration_id, division_id)| LeaderboardEntry {
            registration_id: registration_id.clone(),
            division_id: division_id.clone(),
            total_points: 0.0,
            overall_rank: 0,
            event_results: Vec::new(),
        })
        .collect();
    let index: HashMap<String, usize> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| (e.registration_id.clone(), i))
        .collect();

    for event in events {
        score_one_event(event, config, &mut entries, &index);
    }

    assign_overall_ranks(&mut entries, config);

    entries.sort_by(|a, b| {
        a.division_id
            .cmp(&b.division_id)
            .then(a.overall_rank.cmp(&b.overall_rank))
    });
    entries
}

/// Every athlete appearing in any event, in first-seen order. Athletes who
/// are withdrawn everywhere drop out entirely when withdrawals are
/// excluded.
fn build_roster(events: &[ScoredEvent], config: &ScoringConfig) -> Vec<(String, String)> {
    let mut order: Vec<String> = Vec::new();
    let mut division: HashMap<String, String> = HashMap::new();
    let mut has_standing: HashMap<String, bool> = HashMap::new();

    for event in events {
        for entry in &event.entries {
            if !division.contains_key(&entry.registration_id) {
                order.push(entry.registration_id.clone());
                division.insert(entry.registration_id.clone(), entry.division_id.clone());
            }
            let active_somewhere = has_standing
                .entry(entry.registration_id.clone())
                .or_insert(false);
            *active_somewhere |= entry.status != ScoreStatus::Withdrawn;
        }
    }

    let exclude_withdrawn = config.status_handling.withdrawn == InactiveHandling::Exclude;
    order
        .into_iter()
        .filter(|id| !exclude_withdrawn || has_standing.get(id).copied().unwrap_or(false))
        .map(|id| {
            let div = division[&id].clone();
            (id, div)
        })
        .collect()
}

fn score_one_event(
    event: &ScoredEvent,
    config: &ScoringConfig,
    entries: &mut [LeaderboardEntry],
    index: &HashMap<String, usize>,
) {
    // Divisions never compete against each other; score each field alone.
    let mut fields: HashMap<&str, Vec<FieldEntry>> = HashMap::new();
    for entry in &event.entries {
        if !index.contains_key(&entry.registration_id) {
            continue;
        }
        fields
            .entry(entry.division_id.as_str())
            .or_default()
            .push(entry.clone());
    }

    let mut points_by_athlete: HashMap<String, scoring::EventPoints> = HashMap::new();
    for (division_id, field) in &fields {
        debug!(
            "Event {}: scoring division {division_id} ({} entries)",
            event.track_workout_id,
            field.len()
        );
        for points in scoring::score_event(field, event.scheme, event.tiebreak_scheme, config) {
            points_by_athlete.insert(points.registration_id.clone(), points);
        }
    }

    let multiplier = event.points_multiplier.unwrap_or(100.0) / 100.0;

    for entry in &event.entries {
        let Some(&slot) = index.get(&entry.registration_id) else {
            continue;
        };
        let (rank, base_points) = points_by_athlete
            .get(&entry.registration_id)
            .map(|p| (p.rank, p.points))
            .unwrap_or((0, 0.0));
        let points = scale_points(base_points, multiplier, config);

        let formatted_tiebreak = match (entry.tiebreak_value, event.tiebreak_scheme) {
            (Some(value), Some(scheme)) => Some(format::format_tiebreak(value, scheme)),
            _ => None,
        };

        let athlete = &mut entries[slot];
        athlete.event_results.push(EventResult {
            track_workout_id: event.track_workout_id.clone(),
            rank,
            points,
            raw_score: entry.value,
            formatted_score: format_entry(entry, event),
            formatted_tiebreak,
        });
        athlete.total_points += points;
    }

    // Athletes with no score in this event still get a row.
    for athlete in entries.iter_mut() {
        let present = athlete
            .event_results
            .iter()
            .any(|r| r.track_workout_id == event.track_workout_id);
        if !present {
            athlete.event_results.push(EventResult {
                track_workout_id: event.track_workout_id.clone(),
                rank: 0,
                points: 0.0,
                raw_score: None,
                formatted_score: "N/A".to_string(),
                formatted_tiebreak: None,
            });
        }
    }
}

/// Apply the points multiplier. Placement-based points stay whole numbers;
/// P-Score keeps its unrounded value through summation.
fn scale_points(base: f64, multiplier: f64, config: &ScoringConfig) -> f64 {
    let scaled = base * multiplier;
    match config.algorithm {
        Algorithm::PScore(_) => scaled,
        Algorithm::Traditional(_) | Algorithm::Custom { .. } => scaled.round(),
    }
}

fn format_entry(entry: &FieldEntry, event: &ScoredEvent) -> String {
    match entry.status {
        ScoreStatus::Dns => "DNS".to_string(),
        ScoreStatus::Dnf => "DNF".to_string(),
        ScoreStatus::Withdrawn => "WD".to_string(),
        ScoreStatus::Cap => match entry.value {
            Some(value) => format!("CAP ({})", time::format_ms(value)),
            None => "CAP".to_string(),
        },
        ScoreStatus::Scored => match entry.value {
            Some(value) => format::format_canonical(value, event.scheme, LoadUnit::default()),
            None => String::new(),
        },
    }
}

fn assign_overall_ranks(entries: &mut [LeaderboardEntry], config: &ScoringConfig) {
    let mut divisions: Vec<&str> = entries.iter().map(|e| e.division_id.as_str()).collect();
    divisions.sort_unstable();
    divisions.dedup();
    let divisions: Vec<String> = divisions.into_iter().map(String::from).collect();

    for division_id in divisions {
        let standings: Vec<OverallStanding> = entries
            .iter()
            .filter(|e| e.division_id == division_id)
            .map(|e| OverallStanding {
                registration_id: e.registration_id.clone(),
                total_points: e.total_points,
                event_placements: e
                    .event_results
                    .iter()
                    .filter(|r| r.rank > 0)
                    .map(|r| (r.track_workout_id.clone(), r.rank))
                    .collect(),
            })
            .collect();

        let ranked = apply_tiebreakers(&standings, &config.tiebreaker);
        let ranks: HashMap<&str, u32> = ranked
            .iter()
            .map(|r| (r.registration_id.as_str(), r.rank))
            .collect();
        for entry in entries.iter_mut().filter(|e| e.division_id == division_id) {
            entry.overall_rank = ranks[entry.registration_id.as_str()];
        }
    }
}
