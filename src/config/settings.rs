use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placement-based scoring: rank 1 takes `first_place_points`, every rank
/// below loses `step`, floored at zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraditionalSettings {
    #[serde(default = "default_step")]
    pub step: f64,
    #[serde(default = "default_first_place_points")]
    pub first_place_points: f64,
}

fn default_step() -> f64 {
    5.0
}

fn default_first_place_points() -> f64 {
    100.0
}

impl Default for TraditionalSettings {
    fn default() -> Self {
        Self {
            step: default_step(),
            first_place_points: default_first_place_points(),
        }
    }
}

/// Which slice of the active field defines the P-Score reference median.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MedianField {
    TopHalf,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PScoreSettings {
    #[serde(default = "default_allow_negatives")]
    pub allow_negatives: bool,
    #[serde(default = "default_median_field")]
    pub median_field: MedianField,
}

fn default_allow_negatives() -> bool {
    true
}

fn default_median_field() -> MedianField {
    MedianField::TopHalf
}

impl Default for PScoreSettings {
    fn default() -> Self {
        Self {
            allow_negatives: default_allow_negatives(),
            median_field: default_median_field(),
        }
    }
}

/// Points table a custom configuration starts from before overrides apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseTemplate {
    #[default]
    Traditional,
    WinnerTakesMore,
}

/// Validated custom table: a base template plus sparse per-rank overrides.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CustomTableSettings {
    pub base_template: BaseTemplate,
    pub overrides: BTreeMap<u32, f64>,
}

/// Method for splitting athletes tied on total points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TiebreakerMethod {
    Countback,
    HeadToHead,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TiebreakerSettings {
    #[serde(default = "default_tiebreaker_primary")]
    pub primary: TiebreakerMethod,
    #[serde(default)]
    pub secondary: Option<TiebreakerMethod>,
    #[serde(default)]
    pub head_to_head_event_id: Option<String>,
}

fn default_tiebreaker_primary() -> TiebreakerMethod {
    TiebreakerMethod::Countback
}

impl Default for TiebreakerSettings {
    fn default() -> Self {
        Self {
            primary: default_tiebreaker_primary(),
            secondary: None,
            head_to_head_event_id: None,
        }
    }
}

/// What a non-performing athlete gets in an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InactiveHandling {
    /// Ranked one place after the worst active athlete, with that rank's
    /// points.
    LastPlace,
    /// Ranked after the field with zero points.
    Zero,
    /// Removed from the event entirely.
    Exclude,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusHandlingSettings {
    #[serde(default = "default_dnf_handling")]
    pub dnf: InactiveHandling,
    #[serde(default = "default_dns_handling")]
    pub dns: InactiveHandling,
    #[serde(default = "default_withdrawn_handling")]
    pub withdrawn: InactiveHandling,
}

fn default_dnf_handling() -> InactiveHandling {
    InactiveHandling::LastPlace
}

fn default_dns_handling() -> InactiveHandling {
    InactiveHandling::Zero
}

fn default_withdrawn_handling() -> InactiveHandling {
    InactiveHandling::Exclude
}

impl Default for StatusHandlingSettings {
    fn default() -> Self {
        Self {
            dnf: default_dnf_handling(),
            dns: default_dns_handling(),
            withdrawn: default_withdrawn_handling(),
        }
    }
}

/// Validated scoring algorithm with its settings. Internal code matches
/// exhaustively; unknown algorithm tags never get past `load_config`.
#[derive(Debug, Clone, PartialEq)]
pub enum Algorithm {
    Traditional(TraditionalSettings),
    PScore(PScoreSettings),
    Custom {
        table: CustomTableSettings,
        /// Settings the `Traditional` base template draws from.
        traditional: TraditionalSettings,
    },
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Traditional(_) => "traditional",
            Algorithm::PScore(_) => "p_score",
            Algorithm::Custom { .. } => "custom",
        }
    }
}

/// Fully validated scoring configuration for one competition.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    pub algorithm: Algorithm,
    pub tiebreaker: TiebreakerSettings,
    pub status_handling: StatusHandlingSettings,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Traditional(TraditionalSettings::default()),
            tiebreaker: TiebreakerSettings::default(),
            status_handling: StatusHandlingSettings::default(),
        }
    }
}
