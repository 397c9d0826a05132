//! Overall-standing tiebreakers: how athletes tied on total points get
//! their final ranks.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::config::{TiebreakerMethod, TiebreakerSettings};

/// One athlete's season totals going into overall ranking.
#[derive(Debug, Clone)]
pub struct OverallStanding {
    pub registration_id: String,
    pub total_points: f64,
    /// Event id to finishing rank, only events the athlete placed in.
    pub event_placements: HashMap<String, u32>,
}

/// An athlete's final overall rank.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedStanding {
    pub registration_id: String,
    pub total_points: f64,
    pub rank: u32,
}

/// Rank a division's standings: total points descending, ties split by the
/// configured method (and the secondary method when the primary cannot).
/// Unresolvable ties share a rank and keep their input order; the next
/// distinct athlete takes the positional rank.
///
/// `head_to_head` needs `head_to_head_event_id`; config validation
/// guarantees it is present whenever the method is selected.
pub fn apply_tiebreakers(
    standings: &[OverallStanding],
    settings: &TiebreakerSettings,
) -> Vec<RankedStanding> {
    let mut ordered: Vec<&OverallStanding> = standings.iter().collect();
    ordered.sort_by(|a, b| {
        b.total_points
            .partial_cmp(&a.total_points)
            .unwrap_or(Ordering::Equal)
            .then_with(|| compare_tied(a, b, settings))
    });

    let mut ranked = Vec::with_capacity(ordered.len());
    for (i, standing) in ordered.iter().enumerate() {
        let rank = if i > 0 {
            let previous = ordered[i - 1];
            let tied = previous.total_points == standing.total_points
                && compare_tied(previous, standing, settings) == Ordering::Equal;
            if tied {
                let last: &RankedStanding = &ranked[i - 1];
                last.rank
            } else {
                i as u32 + 1
            }
        } else {
            1
        };
        ranked.push(RankedStanding {
            registration_id: standing.registration_id.clone(),
            total_points: standing.total_points,
            rank,
        });
    }
    ranked
}

fn compare_tied(
    a: &OverallStanding,
    b: &OverallStanding,
    settings: &TiebreakerSettings,
) -> Ordering {
    let primary = compare_by_method(a, b, settings.primary, settings);
    if primary != Ordering::Equal {
        return primary;
    }
    match settings.secondary {
        Some(method) => compare_by_method(a, b, method, settings),
        None => Ordering::Equal,
    }
}

fn compare_by_method(
    a: &OverallStanding,
    b: &OverallStanding,
    method: TiebreakerMethod,
    settings: &TiebreakerSettings,
) -> Ordering {
    match method {
        TiebreakerMethod::None => Ordering::Equal,
        TiebreakerMethod::Countback => countback(a, b),
        TiebreakerMethod::HeadToHead => match &settings.head_to_head_event_id {
            Some(event_id) => head_to_head(a, b, event_id),
            None => Ordering::Equal,
        },
    }
}

/// Most 1st places wins; if equal, most 2nd places, and so on through every
/// place either athlete ever took.
fn countback(a: &OverallStanding, b: &OverallStanding) -> Ordering {
    let worst_place = a
        .event_placements
        .values()
        .chain(b.event_placements.values())
        .copied()
        .max()
        .unwrap_or(0);

    for place in 1..=worst_place {
        let a_count = a.event_placements.values().filter(|&&r| r == place).count();
        let b_count = b.event_placements.values().filter(|&&r| r == place).count();
        match b_count.cmp(&a_count) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// Placement in the designated event decides. An athlete with no placement
/// there loses to one who has one; two absentees stay tied.
fn head_to_head(a: &OverallStanding, b: &OverallStanding, event_id: &str) -> Ordering {
    match (
        a.event_placements.get(event_id),
        b.event_placements.get(event_id),
    ) {
        (Some(a_rank), Some(b_rank)) => a_rank.cmp(b_rank),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
