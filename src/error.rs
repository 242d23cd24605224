//! Error types for the engine and the high-score store.

use thiserror::Error;

/// Failures when building or starting a game. Gameplay itself never fails:
/// blocked moves and rotations are silently reverted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("board must be at least {min}x{min} cells, got {rows}x{cols}")]
    BoardTooSmall { rows: usize, cols: usize, min: usize },
    #[error("player name must not be empty")]
    EmptyName,
}

#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid high score file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no config directory to store high scores in")]
    NoConfigDir,
}
