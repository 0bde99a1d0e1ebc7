//! Nim rules.
//!
//! Every function here is pure: states go in by reference and new states
//! come out, the inputs are never modified.

use std::collections::BTreeSet;
use crate::ai::actions::nim_move::Move;
use crate::core::errors::InvalidMoveError;
use crate::core::game_state::{GameState, Piles, Player};

/// Every legal move of `state`. Empty iff the game is over.
pub fn legal_moves(state: &GameState) -> BTreeSet<Move> {
    available_moves(state.piles()).into_iter().collect()
}

/// Legal moves over raw pile counts, pile ascending then count ascending.
pub fn available_moves(piles: &Piles) -> Vec<Move> {
    let mut moves = Vec::new();
    for (pile, &size) in piles.counts().iter().enumerate() {
        for count in 1..=size {
            moves.push(Move::new(pile, count));
        }
    }
    moves
}

pub fn next_player(player: Player) -> Player {
    player.other()
}

pub fn validate_move(piles: &Piles, action: Move) -> Result<(), InvalidMoveError> {
    let pile_size = piles.get(action.pile).ok_or(InvalidMoveError::InvalidPile {
        pile: action.pile,
        pile_count: piles.len(),
    })?;
    if action.count < 1 || action.count > pile_size {
        return Err(InvalidMoveError::InvalidCount {
            pile: action.pile,
            count: action.count,
            pile_size,
        });
    }
    Ok(())
}

pub fn apply_move(state: &GameState, action: Move) -> Result<GameState, InvalidMoveError> {
    validate_move(state.piles(), action)?;
    Ok(GameState::new(
        state.piles().with_taken(action.pile, action.count),
        next_player(state.current_player()),
    ))
}

pub fn game_over(state: &GameState) -> bool {
    state.piles().is_cleared()
}

/// XOR of all pile counts. The player to move can force a win iff this is non-zero.
pub fn nim_sum(piles: &Piles) -> u32 {
    piles.counts().iter().fold(0, |acc, &c| acc ^ c)
}

/// Moves that leave the opponent a zero nim-sum. Empty for lost positions.
pub fn winning_moves(piles: &Piles) -> Vec<Move> {
    let sum = nim_sum(piles);
    if sum == 0 {
        return Vec::new();
    }
    piles
        .counts()
        .iter()
        .enumerate()
        .filter_map(|(pile, &size)| {
            let target = size ^ sum;
            (target < size).then(|| Move::new(pile, size - target))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumerates_every_count_of_every_pile() {
        let state = GameState::initial([1, 0, 2]);
        let moves: Vec<_> = legal_moves(&state).into_iter().collect();
        assert_eq!(moves, vec![Move::new(0, 1), Move::new(2, 1), Move::new(2, 2)]);
    }

    #[test]
    fn legal_moves_empty_iff_game_over() {
        for piles in [vec![0u32, 0, 0], vec![0, 1, 0], vec![1, 3, 5, 7], Vec::new()] {
            let state = GameState::initial(piles);
            assert_eq!(legal_moves(&state).is_empty(), game_over(&state));
        }
    }

    #[test]
    fn terminal_detection() {
        assert!(game_over(&GameState::new([0, 0, 0], Player::First)));
        assert!(!game_over(&GameState::new([0, 1, 0], Player::Second)));
    }

    #[test]
    fn apply_move_reduces_one_pile_and_switches_player() {
        let state = GameState::initial([1, 3, 5, 7]);
        let before = state.piles().clone();
        let next = apply_move(&state, Move::new(2, 4)).unwrap();

        assert_eq!(state.piles(), &before);
        assert_eq!(next.piles().counts(), &[1, 3, 1, 7]);
        assert_eq!(next.current_player(), Player::Second);
        assert_eq!(before.total() - next.piles().total(), 4);
    }

    #[test]
    fn rejects_out_of_range_pile() {
        let state = GameState::initial([1, 2]);
        assert_eq!(
            apply_move(&state, Move::new(2, 1)),
            Err(InvalidMoveError::InvalidPile { pile: 2, pile_count: 2 })
        );
    }

    #[test]
    fn rejects_zero_and_oversized_counts() {
        let state = GameState::initial([1, 2]);
        assert_eq!(
            apply_move(&state, Move::new(1, 0)),
            Err(InvalidMoveError::InvalidCount { pile: 1, count: 0, pile_size: 2 })
        );
        assert_eq!(
            apply_move(&state, Move::new(0, 2)),
            Err(InvalidMoveError::InvalidCount { pile: 0, count: 2, pile_size: 1 })
        );
    }

    #[test]
    fn winning_moves_restore_zero_nim_sum() {
        let piles = Piles::from([1, 3, 5, 7]);
        assert_eq!(nim_sum(&piles), 0);
        assert!(winning_moves(&piles).is_empty());

        let piles = Piles::from([2, 1]);
        assert_eq!(winning_moves(&piles), vec![Move::new(0, 1)]);
        for m in winning_moves(&Piles::from([3, 4, 5])) {
            assert_eq!(nim_sum(&piles_after(&[3, 4, 5], m)), 0);
        }
    }

    fn piles_after(counts: &[u32], m: Move) -> Piles {
        Piles::from(counts).with_taken(m.pile, m.count)
    }
}
