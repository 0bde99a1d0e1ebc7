// Action selection for QTable

use rand::Rng;
use crate::ai::actions::nim_move::Move;
use crate::core::engine::available_moves;
use crate::core::errors::NimError;
use crate::core::game_state::Piles;
use crate::utils::traits::QValueSource;
use super::QTable;

/// Highest-valued move among `moves`, absent values counting as 0.
///
/// Ties go to the last maximal move in iteration order (`>=` comparison), so
/// with pile-then-count enumeration the result is reproducible.
pub fn greedy_action<S: QValueSource + ?Sized>(source: &S, piles: &Piles, moves: &[Move]) -> Option<Move> {
    let mut best: Option<(Move, f64)> = None;
    for &action in moves {
        let q = source.q_value(piles, action);
        match best {
            Some((_, best_q)) if q < best_q => {}
            _ => best = Some((action, q)),
        }
    }
    best.map(|(action, _)| action)
}

impl QTable {
    /// Epsilon-greedy choice over the moves available from `piles`.
    ///
    /// With `epsilon_enabled`, a uniformly random move is returned with
    /// probability `exploration_rate`; otherwise the greedy move.
    pub fn choose_action(&mut self, piles: &Piles, epsilon_enabled: bool) -> Result<Move, NimError> {
        let moves = available_moves(piles);
        if moves.is_empty() {
            return Err(NimError::EmptyActionSet(piles.clone()));
        }

        if epsilon_enabled {
            let exploration_rate = self.exploration_rate;
            let should_explore = match &mut self.deterministic_rng {
                Some(rng) => rng.gen::<f64>() < exploration_rate,
                None => rand::thread_rng().gen::<f64>() < exploration_rate,
            };

            if should_explore {
                let random_idx = match &mut self.deterministic_rng {
                    Some(rng) => rng.gen_range(0..moves.len()),
                    None => rand::thread_rng().gen_range(0..moves.len()),
                };
                return Ok(moves[random_idx]);
            }
        }

        greedy_action(&*self, piles, &moves).ok_or_else(|| NimError::EmptyActionSet(piles.clone()))
    }

    /// Greedy move with no exploration.
    pub fn choose_move(&self, piles: &Piles) -> Result<Move, NimError> {
        let moves = available_moves(piles);
        greedy_action(self, piles, &moves).ok_or_else(|| NimError::EmptyActionSet(piles.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_picks_last_enumerated_move() {
        let mut table = QTable::default();
        assert_eq!(table.choose_action(&Piles::from([3]), false).unwrap(), Move::new(0, 3));
        assert_eq!(table.choose_move(&Piles::from([2, 1])).unwrap(), Move::new(1, 1));
    }

    #[test]
    fn greedy_prefers_highest_value() {
        let mut table = QTable::new(1.0, 0.0).unwrap();
        let piles = Piles::from([3]);
        table.update_q_value(&piles, Move::new(0, 1), 0.0, 0.4, 0.0);
        table.update_q_value(&piles, Move::new(0, 3), 0.0, -1.0, 0.0);
        assert_eq!(table.choose_action(&piles, false).unwrap(), Move::new(0, 1));
    }

    #[test]
    fn terminal_position_has_no_action() {
        let mut table = QTable::default();
        assert!(matches!(
            table.choose_action(&Piles::from([0, 0]), true),
            Err(NimError::EmptyActionSet(_))
        ));
    }

    #[test]
    fn full_exploration_returns_legal_moves() {
        let mut table = QTable::new(0.5, 1.0).unwrap().with_seed(7);
        let piles = Piles::from([1, 0, 4]);
        let legal = available_moves(&piles);
        for _ in 0..50 {
            let action = table.choose_action(&piles, true).unwrap();
            assert!(legal.contains(&action));
        }
    }

    #[test]
    fn zero_exploration_is_greedy() {
        let mut table = QTable::new(0.5, 0.0).unwrap().with_seed(3);
        for _ in 0..20 {
            assert_eq!(table.choose_action(&Piles::from([2, 2]), true).unwrap(), Move::new(1, 2));
        }
    }
}
