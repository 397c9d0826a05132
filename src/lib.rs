pub mod config;
pub mod domain;
pub mod encoding;
pub mod leaderboard;
pub mod parser;
pub mod scoring;
pub mod tiebreak;

pub use config::{Algorithm, ScoringConfig, load_config};
pub use domain::{
    EventResult, FieldEntry, LeaderboardEntry, ParsedScore, ScoreStatus, ScoredEvent,
    TiebreakScheme, WorkoutScheme,
};
pub use leaderboard::compute_leaderboard;
pub use parser::{ParseContext, parse};
pub use scoring::{EventPoints, score_event};
pub use tiebreak::parse_tiebreak;
