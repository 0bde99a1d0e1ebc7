//! Serialization module for AI learning components

use serde::{Serialize, Deserialize};
use crate::core::game_state::Piles;

/// One stored Q-value. Tuple keys cannot be JSON object keys, so the table
/// is written as a flat list of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableEntry {
    pub piles: Piles,
    pub pile: usize,
    pub count: u32,
    pub value: f64,
}

/// A serializable version of the Q-value table
/// Used for saving and loading trained models to/from JSON files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableQTable {
    pub format_version: u32,
    pub learning_rate: f64,
    pub exploration_rate: f64,
    #[serde(default)]
    pub episodes_trained: u64,
    pub entries: Vec<SerializableEntry>,
}
