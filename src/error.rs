//! Error types for the game core

use std::path::PathBuf;

use thiserror::Error;

use crate::stage::StageId;

/// Errors raised while setting up or running a round.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoundError {
    #[error("cannot start round {round_index} of stage {stage}: no player present")]
    MissingPlayer { stage: StageId, round_index: u32 },
}

/// Errors raised when loading or validating settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("settings must define at least one stage")]
    NoStages,
    #[error("stage {stage} ({name}) must have at least one round")]
    NoRounds { stage: usize, name: String },
    #[error("stage {stage} ({name}) must have at least one pin row and column")]
    EmptyLayout { stage: usize, name: String },
    #[error("{field} must be greater than zero (got {value:.2})")]
    NonPositive { field: &'static str, value: f32 },
    #[error("starting deck is empty")]
    EmptyDeck,
    #[error("board is {width:.1} wide but the largest ball needs {needed:.1}")]
    BoardTooNarrow { width: f32, needed: f32 },
    #[error("board margins ({margins:.1}) leave no room on a board {height:.1} high")]
    MarginsTooLarge { margins: f32, height: f32 },
    #[error("stage {stage} ({name}) layout exceeds {max} rows or columns")]
    LayoutTooLarge {
        stage: usize,
        name: String,
        max: u32,
    },
}

/// Errors raised when loading or saving the leaderboard.
#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("high score file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("high score file is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}
