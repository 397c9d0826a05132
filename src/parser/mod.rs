//! Score Text Parser: turns free-form athlete input into a canonical
//! `ParsedScore` for one workout scheme.
//!
//! Parsing never returns `Err`. Bad input comes back as an invalid
//! `ParsedScore` carrying a human-readable `error`; ambiguous-but-accepted
//! input carries a `warning` and is otherwise valid.

pub mod format;
pub mod time;

pub use format::{format_canonical, format_points, format_tiebreak, format_with_tiebreak};

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::{ParsedScore, ScoreStatus, TiebreakScheme, WorkoutScheme};
use crate::encoding::{self, CANONICAL_ROUNDS_FACTOR, LoadUnit};

static INT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").unwrap());
static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+(\.\d+)?$").unwrap());
static ROUNDS_REPS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s*\+\s*(\d+)$").unwrap());

/// Per-workout context the parser needs beyond the raw text.
#[derive(Debug, Clone, Default)]
pub struct ParseContext {
    /// Time cap in milliseconds, when the workout has one.
    pub time_cap_ms: Option<i64>,
    /// Tiebreak scheme configured for the workout, if any.
    pub tiebreak_scheme: Option<TiebreakScheme>,
    /// Display and encoding unit for load scores.
    pub load_unit: LoadUnit,
}

/// Parse one raw score entry against a workout scheme.
pub fn parse(input: &str, scheme: WorkoutScheme, ctx: &ParseContext) -> ParsedScore {
    let normalized = input.trim().to_lowercase();
    if normalized.is_empty() {
        return ParsedScore::not_entered();
    }

    match normalized.as_str() {
        "dns" | "did not start" => return special_status("DNS", ScoreStatus::Dns),
        "dnf" | "did not finish" => return special_status("DNF", ScoreStatus::Dnf),
        "cap" | "c" => return parse_cap(input, scheme, ctx),
        _ => {}
    }

    match scheme {
        WorkoutScheme::Time | WorkoutScheme::TimeWithCap | WorkoutScheme::Emom => {
            parse_time(input, &normalized, scheme, ctx)
        }
        WorkoutScheme::RoundsReps => parse_rounds_reps(input, &normalized, ctx),
        WorkoutScheme::Reps => parse_count(input, &normalized, "reps", "Invalid rep count")
            .with_tiebreak(ctx.tiebreak_scheme.is_some()),
        WorkoutScheme::Calories => {
            parse_count(input, &normalized, "cal", "Invalid calorie count")
        }
        WorkoutScheme::Points => parse_count(input, &normalized, "pts", "Invalid points"),
        WorkoutScheme::Load => parse_load(input, &normalized, ctx.load_unit),
        WorkoutScheme::Meters | WorkoutScheme::Feet => {
            parse_distance(input, &normalized, scheme)
        }
        WorkoutScheme::PassFail => parse_pass_fail(input, &normalized),
    }
}

/// DNS/DNF: valid entries with no numeric value.
fn special_status(formatted: &str, status: ScoreStatus) -> ParsedScore {
    ParsedScore {
        formatted: formatted.to_string(),
        encoded_value: None,
        is_valid: true,
        status: Some(status),
        needs_tiebreak: false,
        error: None,
        warning: None,
    }
}

fn parse_cap(input: &str, scheme: WorkoutScheme, ctx: &ParseContext) -> ParsedScore {
    if !scheme.allows_cap() {
        return ParsedScore::rejected(input, "CAP is only valid for timed workouts");
    }
    let Some(cap_ms) = ctx.time_cap_ms else {
        return ParsedScore::rejected(input, "CAP requires a configured time cap");
    };
    ParsedScore {
        formatted: format!("CAP ({})", time::format_ms(cap_ms)),
        encoded_value: Some(cap_ms),
        is_valid: true,
        status: Some(ScoreStatus::Cap),
        needs_tiebreak: ctx.tiebreak_scheme.is_some(),
        error: None,
        warning: None,
    }
}

fn parse_time(
    input: &str,
    normalized: &str,
    scheme: WorkoutScheme,
    ctx: &ParseContext,
) -> ParsedScore {
    let Some(ms) = time::parse_clock_ms(normalized) else {
        return ParsedScore::rejected(input, "Invalid time format");
    };

    if scheme.allows_cap() {
        if let Some(cap_ms) = ctx.time_cap_ms {
            // Finishing exactly at the cap counts as capped.
            if ms == cap_ms {
                return parse_cap(input, scheme, ctx);
            }
            if ms > cap_ms {
                let cap_text = time::format_ms(cap_ms);
                if scheme == WorkoutScheme::TimeWithCap {
                    return ParsedScore::rejected(
                        input,
                        format!("Time exceeds cap of {cap_text}"),
                    );
                }
                return ParsedScore::scored(time::format_ms(ms), ms)
                    .with_warning(format!("Time exceeds cap of {cap_text}"));
            }
        }
    }

    ParsedScore::scored(time::format_ms(ms), ms)
}

fn parse_rounds_reps(input: &str, normalized: &str, ctx: &ParseContext) -> ParsedScore {
    let has_tiebreak = ctx.tiebreak_scheme.is_some();

    if normalized.contains('+') {
        let Some(caps) = ROUNDS_REPS_RE.captures(normalized) else {
            return ParsedScore::rejected(input, "Invalid rounds+reps format");
        };
        let (Ok(rounds), Ok(reps)) = (caps[1].parse::<i64>(), caps[2].parse::<i64>()) else {
            return ParsedScore::rejected(input, "Invalid rounds+reps format");
        };
        if reps >= CANONICAL_ROUNDS_FACTOR {
            return ParsedScore::rejected(input, "Invalid rounds+reps format");
        }
        let Some(encoded) = rounds
            .checked_mul(CANONICAL_ROUNDS_FACTOR)
            .and_then(|scaled| scaled.checked_add(reps))
        else {
            return ParsedScore::rejected(input, "Invalid rounds+reps format");
        };
        return ParsedScore::scored(format!("{rounds}+{reps}"), encoded)
            .with_tiebreak(has_tiebreak);
    }

    // No '+': take the number as a total rep count.
    let Some(total_reps) = parse_int(normalized) else {
        return ParsedScore::rejected(input, "Invalid rep count");
    };
    ParsedScore::scored(format!("{total_reps} reps"), total_reps)
        .with_tiebreak(has_tiebreak)
        .with_warning("Interpreted as a total rep count, not rounds+reps")
}

fn parse_count(input: &str, normalized: &str, suffix: &str, error: &str) -> ParsedScore {
    match parse_int(normalized) {
        Some(n) => ParsedScore::scored(format!("{n} {suffix}"), n),
        None => ParsedScore::rejected(input, error),
    }
}

fn parse_load(input: &str, normalized: &str, unit: LoadUnit) -> ParsedScore {
    let Some(value) = parse_number(normalized) else {
        return ParsedScore::rejected(input, "Invalid load");
    };
    let grams = (value * unit.grams_per_unit()).round() as i64;
    ParsedScore::scored(
        format!("{} {}", format_number(value), unit.as_str()),
        grams,
    )
}

fn parse_distance(input: &str, normalized: &str, scheme: WorkoutScheme) -> ParsedScore {
    let Some(value) = parse_number(normalized) else {
        return ParsedScore::rejected(input, "Invalid distance");
    };
    let mm = (value * encoding::mm_per_unit(scheme)).round() as i64;
    let suffix = if scheme == WorkoutScheme::Meters {
        "m"
    } else {
        "ft"
    };
    ParsedScore::scored(format!("{}{suffix}", format_number(value)), mm)
}

fn parse_pass_fail(input: &str, normalized: &str) -> ParsedScore {
    match normalized {
        "pass" | "p" | "1" => ParsedScore::scored("Pass", 1),
        "fail" | "f" | "0" => ParsedScore::scored("Fail", 0),
        _ => ParsedScore::rejected(input, "Enter 'pass' or 'fail'"),
    }
}

fn parse_int(text: &str) -> Option<i64> {
    if INT_RE.is_match(text) {
        text.parse().ok()
    } else {
        None
    }
}

fn parse_number(text: &str) -> Option<f64> {
    if NUMBER_RE.is_match(text) {
        text.parse().ok()
    } else {
        None
    }
}

/// Print a number the way it was typed: no trailing `.0` on whole values.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> ParseContext {
        ParseContext::default()
    }

    fn capped(cap_ms: i64) -> ParseContext {
        ParseContext {
            time_cap_ms: Some(cap_ms),
            ..ParseContext::default()
        }
    }

    #[test]
    fn empty_input_is_not_an_error() {
        let parsed = parse("   ", WorkoutScheme::Time, &ctx());
        assert!(!parsed.is_valid);
        assert!(parsed.error.is_none());
        assert_eq!(parsed.formatted, "");
    }

    #[test]
    fn statuses_are_case_insensitive() {
        for input in ["dns", "DNS", "Did Not Start"] {
            let parsed = parse(input, WorkoutScheme::Reps, &ctx());
            assert_eq!(parsed.status, Some(ScoreStatus::Dns));
            assert_eq!(parsed.formatted, "DNS");
            assert!(parsed.is_valid);
            assert!(parsed.encoded_value.is_none());
        }
        let parsed = parse("DNF", WorkoutScheme::Time, &ctx());
        assert_eq!(parsed.status, Some(ScoreStatus::Dnf));
        assert_eq!(parsed.formatted, "DNF");
    }

    #[test]
    fn bare_digits_are_seconds() {
        let parsed = parse("90", WorkoutScheme::Time, &ctx());
        assert_eq!(parsed.formatted, "1:30");
        assert_eq!(parsed.encoded_value, Some(90_000));
        assert_eq!(parsed.status, Some(ScoreStatus::Scored));
    }

    #[test]
    fn explicit_clock_text() {
        let parsed = parse("12:34", WorkoutScheme::TimeWithCap, &capped(900_000));
        assert_eq!(parsed.formatted, "12:34");
        assert_eq!(parsed.encoded_value, Some(754_000));
    }

    #[test]
    fn time_at_cap_becomes_cap_status() {
        let parsed = parse("15:00", WorkoutScheme::TimeWithCap, &capped(900_000));
        assert_eq!(parsed.status, Some(ScoreStatus::Cap));
        assert_eq!(parsed.formatted, "CAP (15:00)");
        assert_eq!(parsed.encoded_value, Some(900_000));
    }

    #[test]
    fn time_over_cap_is_rejected_for_capped_scheme() {
        let parsed = parse("15:01", WorkoutScheme::TimeWithCap, &capped(900_000));
        assert!(!parsed.is_valid);
        assert_eq!(
            parsed.error.as_deref(),
            Some("Time exceeds cap of 15:00")
        );
        assert!(parsed.encoded_value.is_none());
    }

    #[test]
    fn time_over_cap_warns_for_plain_time() {
        let parsed = parse("15:01", WorkoutScheme::Time, &capped(900_000));
        assert!(parsed.is_valid);
        assert_eq!(parsed.encoded_value, Some(901_000));
        assert!(parsed.warning.is_some());
        assert!(parsed.error.is_none());
    }

    #[test]
    fn cap_marker_requires_timed_scheme_and_configured_cap() {
        let parsed = parse("cap", WorkoutScheme::Reps, &ctx());
        assert!(!parsed.is_valid);
        assert_eq!(
            parsed.error.as_deref(),
            Some("CAP is only valid for timed workouts")
        );

        let parsed = parse("cap", WorkoutScheme::TimeWithCap, &ctx());
        assert!(!parsed.is_valid);
        assert_eq!(
            parsed.error.as_deref(),
            Some("CAP requires a configured time cap")
        );

        let mut context = capped(900_000);
        context.tiebreak_scheme = Some(TiebreakScheme::Reps);
        let parsed = parse("c", WorkoutScheme::TimeWithCap, &context);
        assert_eq!(parsed.status, Some(ScoreStatus::Cap));
        assert_eq!(parsed.formatted, "CAP (15:00)");
        assert_eq!(parsed.encoded_value, Some(900_000));
        assert!(parsed.needs_tiebreak);
    }

    #[test]
    fn rounds_plus_reps() {
        let parsed = parse("5+12", WorkoutScheme::RoundsReps, &ctx());
        assert_eq!(parsed.formatted, "5+12");
        assert_eq!(parsed.encoded_value, Some(500_012));
        assert!(!parsed.needs_tiebreak);

        let mut context = ctx();
        context.tiebreak_scheme = Some(TiebreakScheme::Time);
        let parsed = parse(" 3 + 15 ", WorkoutScheme::RoundsReps, &context);
        assert_eq!(parsed.encoded_value, Some(300_015));
        assert!(parsed.needs_tiebreak);
    }

    #[test]
    fn bare_number_in_rounds_reps_is_total_reps_with_warning() {
        let parsed = parse("150", WorkoutScheme::RoundsReps, &ctx());
        assert_eq!(parsed.formatted, "150 reps");
        assert_eq!(parsed.encoded_value, Some(150));
        assert!(parsed.warning.is_some());
        assert!(parsed.is_valid);
    }

    #[test]
    fn oversized_numeric_input_rejected_without_panicking() {
        // Fits in i64 as seconds but overflows when scaled to milliseconds.
        let parsed = parse("9223372036854776", WorkoutScheme::Time, &ctx());
        assert!(!parsed.is_valid);
        assert_eq!(parsed.error.as_deref(), Some("Invalid time format"));

        // Rounds count overflows the packed rounds+reps encoding.
        let parsed = parse("92233720368547758+5", WorkoutScheme::RoundsReps, &ctx());
        assert!(!parsed.is_valid);
        assert_eq!(parsed.error.as_deref(), Some("Invalid rounds+reps format"));
    }

    #[test]
    fn malformed_rounds_reps_rejected() {
        for input in ["5+", "+12", "5+12+3", "five+12"] {
            let parsed = parse(input, WorkoutScheme::RoundsReps, &ctx());
            assert!(!parsed.is_valid, "input={input}");
            assert_eq!(parsed.error.as_deref(), Some("Invalid rounds+reps format"));
        }
    }

    #[test]
    fn counted_schemes() {
        let parsed = parse("150", WorkoutScheme::Reps, &ctx());
        assert_eq!(parsed.formatted, "150 reps");
        assert_eq!(parsed.encoded_value, Some(150));

        let parsed = parse("42", WorkoutScheme::Calories, &ctx());
        assert_eq!(parsed.formatted, "42 cal");

        let parsed = parse("12", WorkoutScheme::Points, &ctx());
        assert_eq!(parsed.formatted, "12 pts");

        let parsed = parse("-5", WorkoutScheme::Reps, &ctx());
        assert!(!parsed.is_valid);
        assert_eq!(parsed.error.as_deref(), Some("Invalid rep count"));
    }

    #[test]
    fn load_encodes_to_grams() {
        let parsed = parse("225", WorkoutScheme::Load, &ctx());
        assert_eq!(parsed.formatted, "225 lbs");
        assert_eq!(parsed.encoded_value, Some(102_058));

        let kg_ctx = ParseContext {
            load_unit: LoadUnit::Kg,
            ..ParseContext::default()
        };
        let parsed = parse("102.5", WorkoutScheme::Load, &kg_ctx);
        assert_eq!(parsed.formatted, "102.5 kg");
        assert_eq!(parsed.encoded_value, Some(102_500));
    }

    #[test]
    fn distance_encodes_to_millimeters() {
        let parsed = parse("500", WorkoutScheme::Meters, &ctx());
        assert_eq!(parsed.formatted, "500m");
        assert_eq!(parsed.encoded_value, Some(500_000));

        let parsed = parse("30", WorkoutScheme::Feet, &ctx());
        assert_eq!(parsed.formatted, "30ft");
        assert_eq!(parsed.encoded_value, Some(9144));
    }

    #[test]
    fn pass_fail_aliases() {
        for input in ["pass", "P", "1"] {
            let parsed = parse(input, WorkoutScheme::PassFail, &ctx());
            assert_eq!(parsed.formatted, "Pass");
            assert_eq!(parsed.encoded_value, Some(1));
        }
        for input in ["fail", "F", "0"] {
            let parsed = parse(input, WorkoutScheme::PassFail, &ctx());
            assert_eq!(parsed.formatted, "Fail");
            assert_eq!(parsed.encoded_value, Some(0));
        }
        let parsed = parse("maybe", WorkoutScheme::PassFail, &ctx());
        assert_eq!(parsed.error.as_deref(), Some("Enter 'pass' or 'fail'"));
    }

    #[test]
    fn emom_uses_the_time_grammar_without_cap_handling() {
        let parsed = parse("90", WorkoutScheme::Emom, &capped(60_000));
        assert_eq!(parsed.formatted, "1:30");
        assert_eq!(parsed.encoded_value, Some(90_000));
        assert_eq!(parsed.status, Some(ScoreStatus::Scored));
        assert!(parsed.warning.is_none());
    }

    #[test]
    fn garbage_is_rejected_with_original_text() {
        let parsed = parse("fast!", WorkoutScheme::Time, &ctx());
        assert!(!parsed.is_valid);
        assert_eq!(parsed.formatted, "fast!");
        assert_eq!(parsed.error.as_deref(), Some("Invalid time format"));
    }
}
