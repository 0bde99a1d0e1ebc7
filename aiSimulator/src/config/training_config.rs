use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::ai::learning::constants::{DEFAULT_EXPLORATION_RATE, DEFAULT_LEARNING_RATE};
use crate::ai::learning::q_table::core::{validate_exploration_rate, validate_learning_rate};
use crate::config::constants::{
    DEFAULT_CHECKPOINT_DIR, DEFAULT_CHECKPOINT_INTERVAL, DEFAULT_EPISODES, DEFAULT_MODEL_PATH,
    DEFAULT_STARTING_PILES,
};
use crate::core::errors::NimError;
use crate::core::game_state::Piles;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub episodes: usize,                  // Self-play games to run
    pub alpha: f64,                       // Learning rate, (0, 1]
    pub epsilon: f64,                     // Exploration probability, [0, 1]
    pub starting_piles: Piles,            // Position every episode starts from
    pub model_path: PathBuf,              // Where the trained model is written
    pub seed: Option<u64>,                // Seed for reproducible exploration
    pub checkpoint_interval: usize,       // Episodes between checkpoints, 0 = off
    pub checkpoint_dir: PathBuf,
    pub resume: bool,                     // Continue from an existing model at model_path
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: DEFAULT_EPISODES,
            alpha: DEFAULT_LEARNING_RATE,
            epsilon: DEFAULT_EXPLORATION_RATE,
            starting_piles: Piles::from(DEFAULT_STARTING_PILES),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            seed: None,
            checkpoint_interval: DEFAULT_CHECKPOINT_INTERVAL,
            checkpoint_dir: PathBuf::from(DEFAULT_CHECKPOINT_DIR),
            resume: false,
        }
    }
}

impl TrainingConfig {
    /// Read a JSON config; missing fields take their defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, NimError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config: TrainingConfig = serde_json::from_str(&json).map_err(|e| {
            NimError::InvalidConfig(format!("{}: {}", path.as_ref().display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), NimError> {
        if self.episodes == 0 {
            return Err(NimError::InvalidConfig("episodes must be positive".to_string()));
        }
        validate_learning_rate(self.alpha)?;
        validate_exploration_rate(self.epsilon)?;
        if self.starting_piles.is_empty() {
            return Err(NimError::InvalidConfig("starting piles must not be empty".to_string()));
        }
        if let Some(pile) = self.starting_piles.counts().iter().position(|&c| c == 0) {
            return Err(NimError::InvalidConfig(format!(
                "starting pile {} is empty; every pile must hold at least one object", pile
            )));
        }
        Ok(())
    }
}
