//! High score persistence
//!
//! One named integer, persisted best-effort to a small JSON file. Storage
//! trouble is logged and swallowed; it must never interrupt a state
//! transition. Writes follow a read-then-max-then-write discipline so a late
//! write can never regress a higher value already recorded.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct HighScoreFile {
    high_score: u32,
}

/// Best-effort store for the single high-score value
#[derive(Debug)]
pub struct HighScoreStore {
    /// `None` keeps the store purely in memory
    path: Option<PathBuf>,
    best: u32,
}

impl HighScoreStore {
    /// In-memory store (tests, headless demos)
    pub fn in_memory() -> Self {
        Self {
            path: None,
            best: 0,
        }
    }

    /// File-backed store. A missing or corrupt file starts from zero.
    pub fn load(path: PathBuf) -> Self {
        let best = fs::read_to_string(&path)
            .ok()
            .and_then(|json| serde_json::from_str::<HighScoreFile>(&json).ok())
            .map(|file| file.high_score)
            .unwrap_or(0);
        if best > 0 {
            log::info!("Loaded high score {best}");
        }
        Self {
            path: Some(path),
            best,
        }
    }

    /// Current best
    pub fn high_score(&self) -> u32 {
        self.best
    }

    /// Record a finished run's score. Returns true if it set a new best.
    pub fn record(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        self.write_out();
        true
    }

    fn write_out(&self) {
        let Some(path) = &self.path else {
            return;
        };
        let file = HighScoreFile {
            high_score: self.best,
        };
        match serde_json::to_string(&file) {
            Ok(json) => {
                if let Err(err) = fs::write(path, json) {
                    log::warn!("High score write failed: {err}");
                }
            }
            Err(err) => log::warn!("High score serialize failed: {err}"),
        }
    }
}
