use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::engine::{Board, DEFAULT_SIZE};
use crate::error::EngineError;

/// Settings for the self-play driver. Every field may be omitted in TOML.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayConfig {
    /// Board side length.
    pub size: usize,
    /// Number of independent games to play.
    pub games: usize,
    /// Stop a game after this many board-changing moves.
    pub max_moves: u64,
    /// Base seed; game `i` uses `seed + i`. Entropy when absent.
    pub seed: Option<u64>,
}

impl Default for PlayConfig {
    fn default() -> Self {
        PlayConfig {
            size: DEFAULT_SIZE,
            games: 1,
            max_moves: 10_000,
            seed: None,
        }
    }
}

impl PlayConfig {
    pub fn from_toml<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let cfg: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject sizes the engine cannot build.
    pub fn validate(&self) -> Result<(), EngineError> {
        Board::new(self.size).map(|_| ())
    }

    /// Seed for game number `idx`, if the run is seeded.
    pub fn seed_for(&self, idx: usize) -> Option<u64> {
        self.seed.map(|s| s.wrapping_add(idx as u64))
    }
}
