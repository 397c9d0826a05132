//! Tiebreak Resolver: parsing and ordering of the secondary score used to
//! split athletes tied on the primary value.

use std::cmp::Ordering;

use crate::domain::{ParsedScore, TiebreakScheme};
use crate::parser::time;

/// Parse a tiebreak entry. Status markers (CAP/DNS/DNF) are never legal
/// here; a tiebreak is always a plain measurement.
pub fn parse_tiebreak(input: &str, scheme: TiebreakScheme) -> ParsedScore {
    let normalized = input.trim().to_lowercase();
    if normalized.is_empty() {
        return ParsedScore::not_entered();
    }
    if matches!(
        normalized.as_str(),
        "cap" | "c" | "dns" | "did not start" | "dnf" | "did not finish"
    ) {
        return ParsedScore::rejected(input, "Status markers are not valid tie-break scores");
    }

    match scheme {
        TiebreakScheme::Time => match time::parse_clock_ms(&normalized) {
            Some(ms) => ParsedScore::scored(time::format_ms_precise(ms), ms),
            None => ParsedScore::rejected(input, "Invalid time format"),
        },
        TiebreakScheme::Reps => match normalized.parse::<i64>() {
            Ok(reps) if reps >= 0 => ParsedScore::scored(format!("{reps} reps"), reps),
            _ => ParsedScore::rejected(input, "Invalid rep count"),
        },
    }
}

/// Order two tiebreak values: time lower is better, reps higher is better.
/// An absent value on either side never invents an order; the tie stands.
pub fn compare(a: Option<i64>, b: Option<i64>, scheme: TiebreakScheme) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match scheme {
            TiebreakScheme::Time => a.cmp(&b),
            TiebreakScheme::Reps => b.cmp(&a),
        },
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_time_tiebreak_to_millis() {
        let parsed = parse_tiebreak("8:30", TiebreakScheme::Time);
        assert_eq!(parsed.encoded_value, Some(510_000));
        assert_eq!(parsed.formatted, "8:30");

        let parsed = parse_tiebreak("8:30.567", TiebreakScheme::Time);
        assert_eq!(parsed.encoded_value, Some(510_567));
        assert_eq!(parsed.formatted, "8:30.567");
    }

    #[test]
    fn parses_reps_tiebreak() {
        let parsed = parse_tiebreak("150", TiebreakScheme::Reps);
        assert_eq!(parsed.encoded_value, Some(150));
        assert!(parsed.is_valid);
    }

    #[test]
    fn status_markers_are_rejected() {
        for input in ["cap", "c", "dns", "dnf"] {
            let parsed = parse_tiebreak(input, TiebreakScheme::Time);
            assert!(!parsed.is_valid, "input={input}");
            assert!(parsed.error.is_some());
        }
    }

    #[test]
    fn time_lower_wins_reps_higher_wins() {
        assert_eq!(
            compare(Some(510_000), Some(600_000), TiebreakScheme::Time),
            Ordering::Less
        );
        assert_eq!(
            compare(Some(150), Some(100), TiebreakScheme::Reps),
            Ordering::Less
        );
        assert_eq!(
            compare(Some(100), Some(100), TiebreakScheme::Reps),
            Ordering::Equal
        );
    }

    #[test]
    fn absent_values_leave_the_tie() {
        assert_eq!(compare(None, None, TiebreakScheme::Time), Ordering::Equal);
        assert_eq!(
            compare(Some(510_000), None, TiebreakScheme::Time),
            Ordering::Equal
        );
        assert_eq!(compare(None, Some(150), TiebreakScheme::Reps), Ordering::Equal);
    }
}
