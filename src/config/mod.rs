//! Scoring configuration: the stored JSON shape and its validation into the
//! closed [`ScoringConfig`] the scoring code runs on.
//!
//! All string-keyed tags from the store are checked here. A config that
//! survives `load_config` can be dispatched on without any unknown-tag
//! arms downstream.

pub mod settings;

pub use settings::{
    Algorithm, BaseTemplate, CustomTableSettings, InactiveHandling, MedianField, PScoreSettings,
    ScoringConfig, StatusHandlingSettings, TiebreakerMethod, TiebreakerSettings,
    TraditionalSettings,
};

use anyhow::{Context, bail};
use log::info;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Stored JSON shape, camelCase keys, everything optional. Defaults match
/// the traditional configuration competitions start with.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawScoringConfig {
    #[serde(default = "default_algorithm")]
    algorithm: String,
    traditional: Option<TraditionalSettings>,
    p_score: Option<PScoreSettings>,
    custom_table: Option<RawCustomTable>,
    #[serde(default)]
    tiebreaker: TiebreakerSettings,
    #[serde(default)]
    status_handling: StatusHandlingSettings,
}

fn default_algorithm() -> String {
    "traditional".to_string()
}

/// Custom table as stored: rank keys are JSON strings ("1": 150).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCustomTable {
    #[serde(default)]
    base_template: BaseTemplate,
    #[serde(default)]
    overrides: BTreeMap<String, f64>,
}

/// Parse and validate a stored scoring configuration.
pub fn load_config(json: &str) -> anyhow::Result<ScoringConfig> {
    let raw: RawScoringConfig =
        serde_json::from_str(json).context("Failed to parse scoring config")?;

    let traditional = raw.traditional.unwrap_or_default();
    validate_traditional(&traditional)?;

    let algorithm = match raw.algorithm.as_str() {
        "traditional" => Algorithm::Traditional(traditional),
        "p_score" => Algorithm::PScore(raw.p_score.unwrap_or_default()),
        "custom" => Algorithm::Custom {
            table: validate_custom_table(raw.custom_table.unwrap_or(RawCustomTable {
                base_template: BaseTemplate::Traditional,
                overrides: BTreeMap::new(),
            }))?,
            traditional,
        },
        other => bail!("Unknown scoring algorithm: {other}"),
    };

    validate_tiebreaker(&raw.tiebreaker)?;

    info!("Loaded scoring config: algorithm={}", algorithm.name());

    Ok(ScoringConfig {
        algorithm,
        tiebreaker: raw.tiebreaker,
        status_handling: raw.status_handling,
    })
}

fn validate_traditional(settings: &TraditionalSettings) -> anyhow::Result<()> {
    if settings.step < 0.0 {
        bail!("Traditional step must not be negative");
    }
    if settings.first_place_points <= 0.0 {
        bail!("Traditional first place points must be positive");
    }
    Ok(())
}

fn validate_custom_table(raw: RawCustomTable) -> anyhow::Result<CustomTableSettings> {
    let mut overrides = BTreeMap::new();
    for (key, points) in raw.overrides {
        let rank: u32 = key
            .parse()
            .with_context(|| format!("Invalid custom table rank: {key}"))?;
        if rank == 0 {
            bail!("Custom table ranks are 1-indexed, got 0");
        }
        overrides.insert(rank, points);
    }
    Ok(CustomTableSettings {
        base_template: raw.base_template,
        overrides,
    })
}

fn validate_tiebreaker(settings: &TiebreakerSettings) -> anyhow::Result<()> {
    let uses_head_to_head = settings.primary == TiebreakerMethod::HeadToHead
        || settings.secondary == Some(TiebreakerMethod::HeadToHead);
    if uses_head_to_head && settings.head_to_head_event_id.is_none() {
        bail!("head_to_head tiebreaker requires an event id");
    }
    Ok(())
}
