use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Measurement type of a workout's score. Determines the parsing grammar,
/// the canonical unit, and whether a time cap is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkoutScheme {
    Time,
    TimeWithCap,
    RoundsReps,
    Reps,
    Load,
    Calories,
    Meters,
    Feet,
    Points,
    PassFail,
    Emom,
}

impl WorkoutScheme {
    /// Lower values are better for time-based schemes; everything else is
    /// higher-is-better.
    pub fn is_ascending(&self) -> bool {
        matches!(
            self,
            WorkoutScheme::Time | WorkoutScheme::TimeWithCap | WorkoutScheme::Emom
        )
    }

    /// CAP entries are only legal for timed workouts.
    pub fn allows_cap(&self) -> bool {
        matches!(self, WorkoutScheme::Time | WorkoutScheme::TimeWithCap)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutScheme::Time => "time",
            WorkoutScheme::TimeWithCap => "time-with-cap",
            WorkoutScheme::RoundsReps => "rounds-reps",
            WorkoutScheme::Reps => "reps",
            WorkoutScheme::Load => "load",
            WorkoutScheme::Calories => "calories",
            WorkoutScheme::Meters => "meters",
            WorkoutScheme::Feet => "feet",
            WorkoutScheme::Points => "points",
            WorkoutScheme::PassFail => "pass-fail",
            WorkoutScheme::Emom => "emom",
        }
    }
}

impl FromStr for WorkoutScheme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "time" => Ok(WorkoutScheme::Time),
            "time-with-cap" => Ok(WorkoutScheme::TimeWithCap),
            "rounds-reps" => Ok(WorkoutScheme::RoundsReps),
            "reps" => Ok(WorkoutScheme::Reps),
            "load" => Ok(WorkoutScheme::Load),
            "calories" => Ok(WorkoutScheme::Calories),
            "meters" => Ok(WorkoutScheme::Meters),
            "feet" => Ok(WorkoutScheme::Feet),
            "points" => Ok(WorkoutScheme::Points),
            "pass-fail" => Ok(WorkoutScheme::PassFail),
            "emom" => Ok(WorkoutScheme::Emom),
            other => anyhow::bail!("Unknown workout scheme: {other}"),
        }
    }
}

/// Secondary scoring scheme used only to order athletes tied on the
/// primary score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TiebreakScheme {
    Time,
    Reps,
}

impl TiebreakScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            TiebreakScheme::Time => "time",
            TiebreakScheme::Reps => "reps",
        }
    }
}

impl FromStr for TiebreakScheme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "time" => Ok(TiebreakScheme::Time),
            "reps" => Ok(TiebreakScheme::Reps),
            other => anyhow::bail!("Unknown tiebreak scheme: {other}"),
        }
    }
}

/// Outcome status of one score. `Withdrawn` is assigned upstream by the
/// registration flow, never by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreStatus {
    Scored,
    Dns,
    Dnf,
    Cap,
    Withdrawn,
}

impl ScoreStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreStatus::Scored => "scored",
            ScoreStatus::Dns => "dns",
            ScoreStatus::Dnf => "dnf",
            ScoreStatus::Cap => "cap",
            ScoreStatus::Withdrawn => "withdrawn",
        }
    }

    /// Active entries hold a real performance and take part in ranking.
    pub fn is_active(&self) -> bool {
        matches!(self, ScoreStatus::Scored | ScoreStatus::Cap)
    }
}

impl FromStr for ScoreStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scored" => Ok(ScoreStatus::Scored),
            "dns" => Ok(ScoreStatus::Dns),
            "dnf" => Ok(ScoreStatus::Dnf),
            "cap" => Ok(ScoreStatus::Cap),
            "withdrawn" => Ok(ScoreStatus::Withdrawn),
            other => anyhow::bail!("Unknown score status: {other}"),
        }
    }
}

/// Result of parsing one raw text input against a workout scheme.
///
/// Invariant: `encoded_value` is `None` exactly when `status` is DNS/DNF or
/// `is_valid` is false. The encoded value is always in canonical units
/// (milliseconds, grams, millimeters, packed rounds-reps).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedScore {
    pub formatted: String,
    pub encoded_value: Option<i64>,
    pub is_valid: bool,
    pub status: Option<ScoreStatus>,
    pub needs_tiebreak: bool,
    pub error: Option<String>,
    pub warning: Option<String>,
}

impl ParsedScore {
    /// Empty input: not an error, just nothing entered yet.
    pub fn not_entered() -> Self {
        Self {
            formatted: String::new(),
            encoded_value: None,
            is_valid: false,
            status: None,
            needs_tiebreak: false,
            error: None,
            warning: None,
        }
    }

    /// A rejected entry with a human-readable reason.
    pub fn rejected(input: &str, error: impl Into<String>) -> Self {
        Self {
            formatted: input.to_string(),
            encoded_value: None,
            is_valid: false,
            status: None,
            needs_tiebreak: false,
            error: Some(error.into()),
            warning: None,
        }
    }

    /// A valid numeric score.
    pub fn scored(formatted: impl Into<String>, encoded_value: i64) -> Self {
        Self {
            formatted: formatted.into(),
            encoded_value: Some(encoded_value),
            is_valid: true,
            status: Some(ScoreStatus::Scored),
            needs_tiebreak: false,
            error: None,
            warning: None,
        }
    }

    pub fn with_tiebreak(mut self, needs_tiebreak: bool) -> Self {
        self.needs_tiebreak = needs_tiebreak;
        self
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = Some(warning.into());
        self
    }
}

/// One athlete's (or team's) raw outcome in one event, as supplied by the
/// external score store. `value` is in canonical units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldEntry {
    pub registration_id: String,
    pub division_id: String,
    pub value: Option<i64>,
    pub status: ScoreStatus,
    pub tiebreak_value: Option<i64>,
}

/// One event's worth of field entries plus the metadata needed to rank and
/// display them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEvent {
    pub track_workout_id: String,
    pub scheme: WorkoutScheme,
    pub tiebreak_scheme: Option<TiebreakScheme>,
    /// Percent multiplier applied to event points (100 = unscaled).
    pub points_multiplier: Option<f64>,
    pub entries: Vec<FieldEntry>,
}

/// One athlete's outcome in one event after scoring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventResult {
    pub track_workout_id: String,
    /// 1-indexed event rank; 0 when the athlete has no result for the event.
    pub rank: u32,
    pub points: f64,
    pub raw_score: Option<i64>,
    pub formatted_score: String,
    pub formatted_tiebreak: Option<String>,
}

/// One athlete's competition-wide standing. Derived on demand, never
/// persisted: recomputing from the same scores and config must reproduce it
/// exactly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub registration_id: String,
    pub division_id: String,
    pub total_points: f64,
    pub overall_rank: u32,
    pub event_results: Vec<EventResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_round_trips_through_strings() {
        let schemes = [
            WorkoutScheme::Time,
            WorkoutScheme::TimeWithCap,
            WorkoutScheme::RoundsReps,
            WorkoutScheme::Reps,
            WorkoutScheme::Load,
            WorkoutScheme::Calories,
            WorkoutScheme::Meters,
            WorkoutScheme::Feet,
            WorkoutScheme::Points,
            WorkoutScheme::PassFail,
            WorkoutScheme::Emom,
        ];
        for scheme in schemes {
            assert_eq!(scheme.as_str().parse::<WorkoutScheme>().unwrap(), scheme);
        }
    }

    #[test]
    fn unknown_scheme_fails_loudly() {
        assert!("amrap".parse::<WorkoutScheme>().is_err());
        assert!("".parse::<WorkoutScheme>().is_err());
    }

    #[test]
    fn scheme_direction() {
        assert!(WorkoutScheme::Time.is_ascending());
        assert!(WorkoutScheme::TimeWithCap.is_ascending());
        assert!(WorkoutScheme::Emom.is_ascending());
        assert!(!WorkoutScheme::Reps.is_ascending());
        assert!(!WorkoutScheme::Load.is_ascending());
    }

    #[test]
    fn only_timed_schemes_allow_cap() {
        assert!(WorkoutScheme::Time.allows_cap());
        assert!(WorkoutScheme::TimeWithCap.allows_cap());
        assert!(!WorkoutScheme::RoundsReps.allows_cap());
        assert!(!WorkoutScheme::Emom.allows_cap());
    }

    #[test]
    fn status_activity() {
        assert!(ScoreStatus::Scored.is_active());
        assert!(ScoreStatus::Cap.is_active());
        assert!(!ScoreStatus::Dns.is_active());
        assert!(!ScoreStatus::Dnf.is_active());
        assert!(!ScoreStatus::Withdrawn.is_active());
    }

    #[test]
    fn scheme_serde_tags_match_store_values() {
        let json = serde_json::to_string(&WorkoutScheme::TimeWithCap).unwrap();
        assert_eq!(json, "\"time-with-cap\"");
        let parsed: WorkoutScheme = serde_json::from_str("\"rounds-reps\"").unwrap();
        assert_eq!(parsed, WorkoutScheme::RoundsReps);
    }
}
