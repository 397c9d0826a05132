//! Clock-text parsing and formatting. All durations are milliseconds.

use regex::Regex;
use std::sync::LazyLock;

/// `M:SS`, `H:MM:SS`, optional `.mmm` fraction on the seconds part.
static CLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:(\d+):)?(\d+):(\d{1,2})(?:\.(\d{1,3}))?$").unwrap());

static BARE_SECONDS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").unwrap());

/// Parse clock text into milliseconds.
///
/// A bare digit string is a count of seconds ("90" is 1:30). A `:` always
/// delimits explicit minute/second (or hour/minute/second) fields; the
/// seconds field must stay below 60, and below-60 minutes are required once
/// an hours field is present. Durations that overflow the millisecond range
/// are rejected like any other bad input.
pub fn parse_clock_ms(input: &str) -> Option<i64> {
    if BARE_SECONDS_RE.is_match(input) {
        let seconds: i64 = input.parse().ok()?;
        return seconds.checked_mul(1000);
    }

    let caps = CLOCK_RE.captures(input)?;
    let hours: i64 = match caps.get(1) {
        Some(h) => h.as_str().parse().ok()?,
        None => 0,
    };
    let minutes: i64 = caps[2].parse().ok()?;
    let seconds: i64 = caps[3].parse().ok()?;
    if seconds >= 60 || (caps.get(1).is_some() && minutes >= 60) {
        return None;
    }
    let millis: i64 = match caps.get(4) {
        // "8:30.5" means 8:30.500, so right-pad the fraction to three digits
        Some(f) => format!("{:0<3}", f.as_str()).parse().ok()?,
        None => 0,
    };

    hours
        .checked_mul(60)?
        .checked_add(minutes)?
        .checked_mul(60)?
        .checked_add(seconds)?
        .checked_mul(1000)?
        .checked_add(millis)
}

/// Format milliseconds as `M:SS` (or `H:MM:SS` past an hour). Sub-second
/// precision is dropped; tiebreak display uses [`format_ms_precise`].
pub fn format_ms(ms: i64) -> String {
    let total_seconds = ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// Like [`format_ms`] but keeps a `.mmm` suffix when the value is not a
/// whole second. Tiebreak times are stored at millisecond precision.
pub fn format_ms_precise(ms: i64) -> String {
    let base = format_ms(ms);
    let millis = ms % 1000;
    if millis == 0 {
        base
    } else {
        format!("{base}.{millis:03}")
    }
}
