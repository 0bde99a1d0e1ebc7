// Define a trait to abstract the Q-value lookup needed for greedy play

use crate::ai::actions::nim_move::Move;
use crate::core::game_state::Piles;

pub trait QValueSource {
    /// Estimated value of playing `action` from `piles`; 0 when unknown.
    fn q_value(&self, piles: &Piles, action: Move) -> f64;
}
