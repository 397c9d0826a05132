//! Custom table scoring: a base template with sparse per-rank overrides.

use crate::config::{BaseTemplate, CustomTableSettings, TraditionalSettings};
use crate::scoring::traditional;

/// Front-loaded points table. The top placements are worth much more than
/// under traditional scoring; the tail steps down to zero.
pub const WINNER_TAKES_MORE_TABLE: [f64; 17] = [
    100.0, 85.0, 75.0, 70.0, 65.0, 60.0, 55.0, 50.0, 45.0, 40.0, 35.0, 30.0, 25.0, 20.0, 15.0,
    10.0, 5.0,
];

fn winner_takes_more(rank: u32) -> f64 {
    rank.checked_sub(1)
        .and_then(|index| WINNER_TAKES_MORE_TABLE.get(index as usize))
        .copied()
        .unwrap_or(0.0)
}

/// Points for a 1-indexed rank: an override when one exists, otherwise the
/// base template's value.
pub fn points_for_rank(
    rank: u32,
    table: &CustomTableSettings,
    traditional_settings: &TraditionalSettings,
) -> f64 {
    if let Some(&points) = table.overrides.get(&rank) {
        return points;
    }
    match table.base_template {
        BaseTemplate::Traditional => traditional::points_for_rank(rank, traditional_settings),
        BaseTemplate::WinnerTakesMore => winner_takes_more(rank),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn table(base: BaseTemplate, overrides: &[(u32, f64)]) -> CustomTableSettings {
        CustomTableSettings {
            base_template: base,
            overrides: overrides.iter().copied().collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn override_beats_template() {
        let table = table(BaseTemplate::WinnerTakesMore, &[(1, 150.0)]);
        let traditional = TraditionalSettings::default();
        assert_eq!(points_for_rank(1, &table, &traditional), 150.0);
        assert_eq!(points_for_rank(2, &table, &traditional), 85.0);
    }

    #[test]
    fn traditional_template_fallback() {
        let table = table(BaseTemplate::Traditional, &[(2, 90.0)]);
        let traditional = TraditionalSettings::default();
        assert_eq!(points_for_rank(1, &table, &traditional), 100.0);
        assert_eq!(points_for_rank(2, &table, &traditional), 90.0);
        assert_eq!(points_for_rank(3, &table, &traditional), 90.0);
    }

    #[test]
    fn winner_takes_more_front_loads() {
        let table = table(BaseTemplate::WinnerTakesMore, &[]);
        let traditional = TraditionalSettings::default();
        assert_eq!(points_for_rank(1, &table, &traditional), 100.0);
        assert_eq!(points_for_rank(2, &table, &traditional), 85.0);
        assert_eq!(points_for_rank(3, &table, &traditional), 75.0);
        assert_eq!(points_for_rank(50, &table, &traditional), 0.0);
        assert_eq!(points_for_rank(0, &table, &traditional), 0.0);
    }
}
