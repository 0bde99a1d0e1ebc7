//! Measures how well a learned policy plays.
//!
//! Two checks: games against an opponent that moves uniformly at random, and
//! agreement with perfect play (a move restoring a zero nim-sum) over every
//! position reachable from the starting piles.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use crate::ai::policy::trained_policy::TrainedPolicy;
use crate::config::constants::PERCENT_CONVERSION;
use crate::core::engine;
use crate::core::errors::NimError;
use crate::core::game_state::{GameState, Piles, Player};
use crate::utils::logging::{self, OperationCategory};
use crate::utils::traits::QValueSource;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationReport {
    pub games: usize,
    pub wins: usize,
    pub wins_moving_first: usize,
    pub games_moving_first: usize,
}

impl EvaluationReport {
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 { 0.0 } else { self.wins as f64 / self.games as f64 }
    }
}

impl std::fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "won {}/{} games ({:.1}%), {}/{} when moving first",
            self.wins,
            self.games,
            self.win_rate() * PERCENT_CONVERSION,
            self.wins_moving_first,
            self.games_moving_first
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgreementReport {
    /// Positions where a winning move exists
    pub winning_positions: usize,
    /// Of those, positions where the policy picks a winning move
    pub optimal_choices: usize,
}

impl AgreementReport {
    pub fn agreement(&self) -> f64 {
        if self.winning_positions == 0 {
            1.0
        } else {
            self.optimal_choices as f64 / self.winning_positions as f64
        }
    }
}

/// Play `games` games against a random mover, alternating who starts.
pub fn evaluate_against_random<S: QValueSource>(
    policy: &TrainedPolicy<S>,
    starting_piles: &Piles,
    games: usize,
    seed: Option<u64>,
) -> Result<EvaluationReport, NimError> {
    let _timing = logging::start_timing("evaluate_against_random", OperationCategory::Analysis);
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut report = EvaluationReport::default();
    for game in 0..games {
        let ai_player = if game % 2 == 0 { Player::First } else { Player::Second };
        let mut state = GameState::initial(starting_piles.clone());
        if engine::game_over(&state) {
            return Err(NimError::EmptyActionSet(starting_piles.clone()));
        }

        let winner = loop {
            let mover = state.current_player();
            let action = if mover == ai_player {
                policy.choose_move(state.piles())?
            } else {
                let moves = engine::available_moves(state.piles());
                moves[rng.gen_range(0..moves.len())]
            };
            state = engine::apply_move(&state, action)?;
            if engine::game_over(&state) {
                break mover;
            }
        };

        report.games += 1;
        if ai_player == Player::First {
            report.games_moving_first += 1;
        }
        if winner == ai_player {
            report.wins += 1;
            if ai_player == Player::First {
                report.wins_moving_first += 1;
            }
        }
    }

    info!("evaluation against random opponent: {}", report);
    Ok(report)
}

/// Every non-terminal position with each pile at most its starting size.
pub fn reachable_positions(starting_piles: &Piles) -> Vec<Piles> {
    let mut positions = vec![Vec::new()];
    for &size in starting_piles.counts() {
        positions = positions
            .into_iter()
            .flat_map(|prefix: Vec<u32>| {
                (0..=size).map(move |count| {
                    let mut next = prefix.clone();
                    next.push(count);
                    next
                })
            })
            .collect();
    }
    positions
        .into_iter()
        .map(Piles::from)
        .filter(|piles| !piles.is_cleared())
        .collect()
}

pub fn optimal_agreement<S: QValueSource>(
    policy: &TrainedPolicy<S>,
    starting_piles: &Piles,
) -> Result<AgreementReport, NimError> {
    let _timing = logging::start_timing("optimal_agreement", OperationCategory::Analysis);
    let mut report = AgreementReport::default();
    for piles in reachable_positions(starting_piles) {
        let winning = engine::winning_moves(&piles);
        if winning.is_empty() {
            continue;
        }
        report.winning_positions += 1;
        if winning.contains(&policy.choose_move(&piles)?) {
            report.optimal_choices += 1;
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::learning::q_table::QTable;

    #[test]
    fn reachable_positions_exclude_terminal() {
        let positions = reachable_positions(&Piles::from([1, 2]));
        assert_eq!(positions.len(), 5);
        assert!(positions.iter().all(|p| !p.is_cleared()));
        assert!(positions.contains(&Piles::from([1, 2])));
    }

    #[test]
    fn single_pile_is_always_won_greedily() {
        // An empty table takes the whole last pile, which wins single-pile Nim
        let policy = TrainedPolicy::from_source(QTable::default());
        let report = evaluate_against_random(&policy, &Piles::from([4]), 10, Some(1)).unwrap();
        assert_eq!(report.games, 10);
        assert_eq!(report.wins_moving_first, 5);
        assert_eq!(report.games_moving_first, 5);

        let agreement = optimal_agreement(&policy, &Piles::from([4])).unwrap();
        assert_eq!(agreement.winning_positions, 4);
        assert_eq!(agreement.agreement(), 1.0);
    }
}
