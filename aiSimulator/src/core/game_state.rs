use std::str::FromStr;
use serde::{Serialize, Deserialize};

/// The two turn-takers of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    First,
    Second,
}

impl Player {
    pub fn other(self) -> Player {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Player::First => 0,
            Player::Second => 1,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::First => write!(f, "Player 1"),
            Player::Second => write!(f, "Player 2"),
        }
    }
}

/// Ordered pile counts. This is the canonical state signature used as the
/// Q-table key: equal configurations hash and compare equal.
///
/// There is no mutable access to the counts. Removing objects always yields
/// a new `Piles`, so a state kept for history can never be changed behind
/// its owner's back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Piles(Vec<u32>);

impl Piles {
    pub fn new(counts: impl Into<Vec<u32>>) -> Self {
        Piles(counts.into())
    }

    pub fn counts(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, pile: usize) -> Option<u32> {
        self.0.get(pile).copied()
    }

    pub fn total(&self) -> u64 {
        self.0.iter().map(|&c| c as u64).sum()
    }

    /// True when no objects remain.
    pub fn is_cleared(&self) -> bool {
        self.0.iter().all(|&c| c == 0)
    }

    /// Copy with `count` removed from `pile`. Bounds are checked by the engine.
    pub(crate) fn with_taken(&self, pile: usize, count: u32) -> Piles {
        let mut counts = self.0.clone();
        counts[pile] -= count;
        Piles(counts)
    }
}

impl From<Vec<u32>> for Piles {
    fn from(counts: Vec<u32>) -> Self {
        Piles(counts)
    }
}

impl From<&[u32]> for Piles {
    fn from(counts: &[u32]) -> Self {
        Piles(counts.to_vec())
    }
}

impl<const N: usize> From<[u32; N]> for Piles {
    fn from(counts: [u32; N]) -> Self {
        Piles(counts.to_vec())
    }
}

impl std::fmt::Display for Piles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, count) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", count)?;
        }
        write!(f, "]")
    }
}

/// Parses comma separated counts such as `1,3,5,7` (brackets and spaces allowed).
impl FromStr for Piles {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('[').trim_end_matches(']');
        if trimmed.trim().is_empty() {
            return Ok(Piles(Vec::new()));
        }
        trimmed
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<u32>()
                    .map_err(|e| format!("Invalid pile count '{}': {}", part.trim(), e))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Piles)
    }
}

/// Immutable game position: the piles plus whose turn it is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    piles: Piles,
    current_player: Player,
}

impl GameState {
    pub fn new(piles: impl Into<Piles>, current_player: Player) -> Self {
        Self {
            piles: piles.into(),
            current_player,
        }
    }

    /// Starting position with `Player::First` to move.
    pub fn initial(piles: impl Into<Piles>) -> Self {
        Self::new(piles, Player::First)
    }

    pub fn piles(&self) -> &Piles {
        &self.piles
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} to move)", self.piles, self.current_player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_configurations_are_equal_keys() {
        use std::collections::HashSet;
        let a = Piles::new(vec![1, 3, 5]);
        let b: Piles = [1, 3, 5].into();
        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn with_taken_leaves_original_alone() {
        let piles = Piles::from([2, 4]);
        let taken = piles.with_taken(1, 3);
        assert_eq!(piles.counts(), &[2, 4]);
        assert_eq!(taken.counts(), &[2, 1]);
    }

    #[test]
    fn parses_from_cli_text() {
        assert_eq!("1,3,5,7".parse::<Piles>().unwrap(), Piles::from([1, 3, 5, 7]));
        assert_eq!("[2, 2]".parse::<Piles>().unwrap(), Piles::from([2, 2]));
        assert!("1,x".parse::<Piles>().is_err());
        assert_eq!(Piles::from([1, 0, 2]).to_string(), "[1, 0, 2]");
    }

    #[test]
    fn players_alternate() {
        assert_eq!(Player::First.other(), Player::Second);
        assert_eq!(Player::Second.other(), Player::First);
    }
}
