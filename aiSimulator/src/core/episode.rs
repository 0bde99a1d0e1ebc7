use tracing::trace;
use crate::ai::actions::nim_move::Move;
use crate::ai::learning::constants::{CONTINUE_REWARD, LOSS_REWARD, WIN_REWARD};
use crate::ai::learning::q_table::QTable;
use crate::core::engine;
use crate::core::errors::NimError;
use crate::core::game_state::{GameState, Piles, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeOutcome {
    pub winner: Player,
    pub moves: usize,
}

/// Each player's most recent `(piles, move)`, waiting to be credited once
/// the opponent has replied.
#[derive(Debug, Default)]
struct LastTransitions {
    records: [Option<(Piles, Move)>; 2],
}

impl LastTransitions {
    fn get(&self, player: Player) -> Option<&(Piles, Move)> {
        self.records[player.index()].as_ref()
    }

    fn set(&mut self, player: Player, piles: Piles, action: Move) {
        self.records[player.index()] = Some((piles, action));
    }
}

/// Play one self-play game from `starting_piles`, learning from every transition.
///
/// Rewards are only handed out when the game ends: the player who takes the
/// last object gets +1 and the opponent's last move gets -1. Every other
/// transition is credited with 0 once the opponent has replied, so value
/// flows back through `best_future_reward`.
pub fn run_episode(table: &mut QTable, starting_piles: &Piles) -> Result<EpisodeOutcome, NimError> {
    let mut state = GameState::initial(starting_piles.clone());
    if engine::game_over(&state) {
        return Err(NimError::EmptyActionSet(starting_piles.clone()));
    }

    let mut last = LastTransitions::default();
    let mut moves = 0;

    loop {
        let mover = state.current_player();
        let piles = state.piles().clone();
        let action = table.choose_action(&piles, true)?;
        let new_state = engine::apply_move(&state, action)?;
        moves += 1;

        trace!(%mover, %piles, %action, "self-play move");
        last.set(mover, piles.clone(), action);

        let opponent = new_state.current_player();
        if engine::game_over(&new_state) {
            table.update(&piles, action, new_state.piles(), WIN_REWARD);
            if let Some((opponent_piles, opponent_action)) = last.get(opponent) {
                table.update(opponent_piles, *opponent_action, new_state.piles(), LOSS_REWARD);
            }
            table.record_episode();
            return Ok(EpisodeOutcome { winner: mover, moves });
        }

        if let Some((opponent_piles, opponent_action)) = last.get(opponent) {
            table.update(opponent_piles, *opponent_action, new_state.piles(), CONTINUE_REWARD);
        }

        state = new_state;
    }
}
