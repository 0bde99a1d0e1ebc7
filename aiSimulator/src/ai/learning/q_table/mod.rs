//! Q-Value Table Module
//!
//! Tabular Q-learning for Nim. The QTable struct is defined here and its
//! implementation is split into submodules by functionality.

pub mod core;
pub mod sampling;
pub mod serialization;
pub mod diagnostics;

pub use self::diagnostics::TableSummary;
pub use self::sampling::greedy_action;

use std::collections::HashMap;

use rand::rngs::StdRng;

use crate::ai::actions::nim_move::Move;
use crate::core::game_state::Piles;

/// Value estimates for `(piles, move)` pairs, learned from the point of view
/// of the player about to move.
///
/// A pair that was never updated has value 0.
#[derive(Debug, Clone)]
pub struct QTable {
    /// Maps a pile configuration to the values of the moves tried from it
    q: HashMap<Piles, HashMap<Move, f64>>,

    /// Learning rate (alpha), in (0, 1]
    learning_rate: f64,

    /// Exploration rate (epsilon) for epsilon-greedy selection, in [0, 1]
    exploration_rate: f64,

    /// Self-play games this table has learned from, across resumed runs
    episodes_trained: u64,

    /// Optional deterministic RNG for reproducible runs
    deterministic_rng: Option<StdRng>,
}

impl PartialEq for QTable {
    fn eq(&self, other: &Self) -> bool {
        self.q == other.q
            && self.learning_rate == other.learning_rate
            && self.exploration_rate == other.exploration_rate
            && self.episodes_trained == other.episodes_trained
    }
}
