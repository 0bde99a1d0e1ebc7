// Core operations for QTable: construction, lookup and the update rule

use std::collections::HashMap;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;
use crate::ai::actions::nim_move::Move;
use crate::ai::learning::constants::*;
use crate::core::engine::available_moves;
use crate::core::errors::NimError;
use crate::core::game_state::Piles;
use crate::utils::traits::QValueSource;
use super::QTable;

pub fn validate_learning_rate(learning_rate: f64) -> Result<(), NimError> {
    if !(learning_rate > 0.0 && learning_rate <= 1.0) {
        return Err(NimError::InvalidConfig(format!(
            "alpha must be in (0, 1], got {}", learning_rate
        )));
    }
    Ok(())
}

pub fn validate_exploration_rate(exploration_rate: f64) -> Result<(), NimError> {
    if !(0.0..=1.0).contains(&exploration_rate) {
        return Err(NimError::InvalidConfig(format!(
            "epsilon must be in [0, 1], got {}", exploration_rate
        )));
    }
    Ok(())
}

impl QTable {
    pub fn new(learning_rate: f64, exploration_rate: f64) -> Result<Self, NimError> {
        validate_learning_rate(learning_rate)?;
        validate_exploration_rate(exploration_rate)?;
        Ok(Self {
            q: HashMap::new(),
            learning_rate,
            exploration_rate,
            episodes_trained: 0,
            deterministic_rng: None,
        })
    }

    /// Use a seeded RNG for exploration instead of the thread RNG.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.deterministic_rng = Some(StdRng::seed_from_u64(seed));
        self
    }

    pub(crate) fn from_parts(
        q: HashMap<Piles, HashMap<Move, f64>>,
        learning_rate: f64,
        exploration_rate: f64,
        episodes_trained: u64,
    ) -> Self {
        Self {
            q,
            learning_rate,
            exploration_rate,
            episodes_trained,
            deterministic_rng: None,
        }
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) -> Result<(), NimError> {
        validate_learning_rate(learning_rate)?;
        self.learning_rate = learning_rate;
        Ok(())
    }

    pub fn exploration_rate(&self) -> f64 {
        self.exploration_rate
    }

    pub fn set_exploration_rate(&mut self, exploration_rate: f64) -> Result<(), NimError> {
        validate_exploration_rate(exploration_rate)?;
        self.exploration_rate = exploration_rate;
        Ok(())
    }

    pub fn episodes_trained(&self) -> u64 {
        self.episodes_trained
    }

    pub fn record_episode(&mut self) {
        self.episodes_trained += 1;
    }

    /// Number of stored `(piles, move)` values.
    pub fn len(&self) -> usize {
        self.q.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn state_count(&self) -> usize {
        self.q.len()
    }

    /// All stored values, sorted by piles then move.
    pub fn sorted_entries(&self) -> Vec<(Piles, Move, f64)> {
        let mut entries: Vec<_> = self
            .q
            .iter()
            .flat_map(|(piles, moves)| {
                moves.iter().map(move |(action, &value)| (piles.clone(), *action, value))
            })
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));
        entries
    }

    pub fn get_q_value(&self, piles: &Piles, action: Move) -> f64 {
        self.q
            .get(piles)
            .and_then(|moves| moves.get(&action))
            .copied()
            .unwrap_or(DEFAULT_Q_VALUE)
    }

    /// Stores `old_q + alpha * ((reward + best_future) - old_q)`.
    pub fn update_q_value(&mut self, piles: &Piles, action: Move, old_q: f64, reward: f64, best_future: f64) {
        let new_value_estimate = reward + best_future;
        let new_q = old_q + self.learning_rate * (new_value_estimate - old_q);

        if is_debug_q_updates_enabled() {
            debug!(%piles, %action, old_q, reward, best_future, new_q, "q update");
        }

        self.q
            .entry(piles.clone())
            .or_default()
            .insert(action, new_q);
    }

    /// Highest value among the moves available from `piles`, 0 when there are none.
    pub fn best_future_reward(&self, piles: &Piles) -> f64 {
        available_moves(piles)
            .into_iter()
            .map(|action| self.get_q_value(piles, action))
            .fold(None, |best: Option<f64>, q| Some(best.map_or(q, |b| b.max(q))))
            .unwrap_or(TERMINAL_FUTURE_REWARD)
    }

    /// Learn from one transition `old_piles --action--> new_piles`.
    pub fn update(&mut self, old_piles: &Piles, action: Move, new_piles: &Piles, reward: f64) {
        let old = self.get_q_value(old_piles, action);
        let best_future = self.best_future_reward(new_piles);
        self.update_q_value(old_piles, action, old, reward, best_future);
    }
}

impl Default for QTable {
    fn default() -> Self {
        Self {
            q: HashMap::new(),
            learning_rate: DEFAULT_LEARNING_RATE,
            exploration_rate: DEFAULT_EXPLORATION_RATE,
            episodes_trained: 0,
            deterministic_rng: None,
        }
    }
}

impl QValueSource for QTable {
    fn q_value(&self, piles: &Piles, action: Move) -> f64 {
        self.get_q_value(piles, action)
    }
}
