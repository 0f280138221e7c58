//! High-score persistence
//!
//! The best score survives restarts of the maintenance screen as a small
//! JSON file next to wherever the operator points us.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The persisted record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreTable {
    /// Best score ever recorded on this machine
    pub best: u32,
}

/// Loads and saves the high-score table at a fixed path
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the table; a missing file yields an empty table
    pub fn load(&self) -> Result<HighScoreTable> {
        if !self.path.exists() {
            return Ok(HighScoreTable::default());
        }

        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read high scores from {:?}", self.path))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse high scores in {:?}", self.path))
    }

    /// Write the table, creating parent directories if needed
    pub fn save(&self, table: &HighScoreTable) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(table).context("Failed to serialize high scores")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write high scores to {:?}", self.path))?;

        Ok(())
    }
}
