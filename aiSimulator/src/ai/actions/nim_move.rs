// Nim Move module - contains the Move struct definition
use serde::{Serialize, Deserialize};

/// Remove `count` objects from pile `pile`.
///
/// Field order matters: the derived ordering sorts by pile first, then count,
/// which is the enumeration order greedy tie-breaking relies on.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub pile: usize,
    pub count: u32,
}

impl Move {
    pub fn new(pile: usize, count: u32) -> Self {
        Self { pile, count }
    }
}

impl From<(usize, u32)> for Move {
    fn from((pile, count): (usize, u32)) -> Self {
        Move { pile, count }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "take {} from pile {}", self.count, self.pile)
    }
}
