use std::io::{BufRead, Write};
use crate::ai::actions::nim_move::Move;
use crate::ai::policy::trained_policy::TrainedPolicy;
use crate::core::engine;
use crate::core::errors::NimError;
use crate::core::game_state::{GameState, Piles, Player};
use crate::utils::traits::QValueSource;

pub fn print_board<W: Write>(out: &mut W, piles: &Piles) -> std::io::Result<()> {
    writeln!(out, "\nPiles:")?;
    for (i, &count) in piles.counts().iter().enumerate() {
        writeln!(out, "Pile {}: {:>2} {}", i, count, "|".repeat(count as usize))?;
    }
    writeln!(out)
}

/// Parse "pile count", separated by whitespace or a comma.
pub fn parse_move(line: &str) -> Option<Move> {
    let mut parts = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty());
    let pile = parts.next()?.parse::<usize>().ok()?;
    let count = parts.next()?.parse::<u32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Move::new(pile, count))
}

fn read_human_move<R: BufRead, W: Write>(
    state: &GameState,
    input: &mut R,
    out: &mut W,
) -> Result<(GameState, Move), NimError> {
    loop {
        write!(out, "Your move (pile count): ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(NimError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "input closed before the game finished",
            )));
        }

        let Some(action) = parse_move(&line) else {
            writeln!(out, "Please enter two numbers: the pile and how many to take.")?;
            continue;
        };

        match engine::apply_move(state, action) {
            Ok(next) => return Ok((next, action)),
            Err(e) => writeln!(out, "Invalid move: {}. Try again.", e)?,
        }
    }
}

/// Play one game between a human on `input`/`out` and `policy`. Returns the winner.
pub fn play_game<S, R, W>(
    policy: &TrainedPolicy<S>,
    starting_piles: &Piles,
    human: Player,
    input: &mut R,
    out: &mut W,
) -> Result<Player, NimError>
where
    S: QValueSource,
    R: BufRead,
    W: Write,
{
    let mut state = GameState::initial(starting_piles.clone());
    if engine::game_over(&state) {
        return Err(NimError::EmptyActionSet(starting_piles.clone()));
    }

    loop {
        print_board(out, state.piles())?;
        let mover = state.current_player();

        if mover == human {
            writeln!(out, "Your turn")?;
            let (next, _) = read_human_move(&state, input, out)?;
            state = next;
        } else {
            writeln!(out, "AI's turn")?;
            let action = policy.choose_move(state.piles())?;
            writeln!(out, "AI chose to {}.", action)?;
            state = engine::apply_move(&state, action)?;
        }

        if engine::game_over(&state) {
            writeln!(out, "\nGAME OVER")?;
            let winner_label = if mover == human { "You" } else { "AI" };
            writeln!(out, "Winner is {}", winner_label)?;
            return Ok(mover);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::learning::q_table::QTable;

    #[test]
    fn parses_moves_loosely() {
        assert_eq!(parse_move("1 2\n"), Some(Move::new(1, 2)));
        assert_eq!(parse_move(" 0, 3 "), Some(Move::new(0, 3)));
        assert_eq!(parse_move("1"), None);
        assert_eq!(parse_move("1 2 3"), None);
        assert_eq!(parse_move("a b"), None);
    }

    #[test]
    fn human_retries_until_move_is_legal() {
        let policy = TrainedPolicy::from_source(QTable::default());
        let mut input = std::io::Cursor::new("5 1\n0 9\nnonsense\n0 1\n");
        let mut out = Vec::new();

        // Human takes the single object and wins
        let winner = play_game(&policy, &Piles::from([1]), Player::First, &mut input, &mut out).unwrap();
        assert_eq!(winner, Player::First);

        let transcript = String::from_utf8(out).unwrap();
        assert!(transcript.contains("pile out of range"));
        assert!(transcript.contains("count out of range"));
        assert!(transcript.contains("Winner is You"));
    }

    #[test]
    fn ai_moves_when_it_is_first() {
        let policy = TrainedPolicy::from_source(QTable::default());
        let mut input = std::io::Cursor::new("");
        let mut out = Vec::new();
        let winner = play_game(&policy, &Piles::from([2]), Player::Second, &mut input, &mut out).unwrap();
        assert_eq!(winner, Player::First);
    }

    #[test]
    fn closed_input_is_an_error() {
        let policy = TrainedPolicy::from_source(QTable::default());
        let mut input = std::io::Cursor::new("");
        let mut out = Vec::new();
        assert!(play_game(&policy, &Piles::from([2]), Player::First, &mut input, &mut out).is_err());
    }
}
