// Trained Policy module - greedy move selection from a loaded table

use std::path::Path;
use crate::ai::actions::nim_move::Move;
use crate::ai::learning::q_table::{greedy_action, QTable};
use crate::core::engine::available_moves;
use crate::core::errors::{ModelLoadError, NimError};
use crate::core::game_state::Piles;
use crate::utils::traits::QValueSource;

/// Plays greedily from a trained model. The table is never modified.
pub struct TrainedPolicy<S: QValueSource = QTable> {
    source: S,
}

impl TrainedPolicy<QTable> {
    /// Load a persisted model. Fails rather than falling back to an empty table.
    pub fn load(model_path: impl AsRef<Path>) -> Result<Self, ModelLoadError> {
        Ok(Self::from_source(QTable::load_from_file(model_path)?))
    }

    pub fn table(&self) -> &QTable {
        &self.source
    }
}

impl<S: QValueSource> TrainedPolicy<S> {
    pub fn from_source(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn choose_move(&self, piles: &Piles) -> Result<Move, NimError> {
        greedy_action(&self.source, piles, &available_moves(piles))
            .ok_or_else(|| NimError::EmptyActionSet(piles.clone()))
    }
}
