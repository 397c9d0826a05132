pub mod models;

pub use models::{
    EventResult, FieldEntry, LeaderboardEntry, ParsedScore, ScoreStatus, ScoredEvent,
    TiebreakScheme, WorkoutScheme,
};
