//! Persist high scores to disk (XDG config or ~/.config/blockdrop).
//!
//! The table is a JSON array of `{ "name": ..., "score": ... }` objects,
//! best first, at most [`MAX_ENTRIES`] long.

use crate::error::HighScoreError;
use crate::game::FinalScore;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const FILENAME: &str = "highscores.json";

/// Entries kept in the table.
pub const MAX_ENTRIES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u32,
}

/// Best scores, sorted descending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
}

/// Default location of the high scores file (config dir / blockdrop / highscores.json).
pub fn default_path() -> Result<PathBuf, HighScoreError> {
    let base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => std::env::var("HOME")
            .map(|h| PathBuf::from(h).join(".config"))
            .map_err(|_| HighScoreError::NoConfigDir)?,
    };
    Ok(base.join("blockdrop").join(FILENAME))
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    /// Best score in the table, 0 if empty.
    pub fn best(&self) -> u32 {
        self.entries.first().map_or(0, |e| e.score)
    }

    /// Add a result. Empty names are ignored. Equal scores keep their
    /// arrival order. Returns true if the entry made the table.
    pub fn submit(&mut self, name: &str, score: u32) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let at = self.entries.partition_point(|e| e.score >= score);
        if at >= MAX_ENTRIES {
            return false;
        }
        self.entries.insert(
            at,
            HighScoreEntry {
                name: name.to_string(),
                score,
            },
        );
        self.entries.truncate(MAX_ENTRIES);
        true
    }

    pub fn record(&mut self, result: &FinalScore) -> bool {
        self.submit(&result.name, result.score)
    }

    /// Read the table at `path`.
    pub fn load(path: &Path) -> Result<Self, HighScoreError> {
        let content = fs::read_to_string(path)?;
        let mut scores: Self = serde_json::from_str(&content)?;
        scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
        scores.entries.truncate(MAX_ENTRIES);
        Ok(scores)
    }

    /// Like [`load`](Self::load) but an empty table on missing/parse error.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(scores) => scores,
            Err(e) => {
                log::debug!("no high scores loaded from {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Save to `path`. Creates the parent directory if needed.
    pub fn save(&self, path: &Path) -> Result<(), HighScoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
