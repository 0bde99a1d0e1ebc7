// AI module structure for the Nim learner
// Organized in sub-modules by concern

// Actions module - contains the move definition
pub mod actions {
    pub mod nim_move;
}

// Learning module - contains the Q-value table and its persistence
pub mod learning {
    pub mod q_table;
    pub mod constants;
    pub mod serialization;
}

// Policy module - greedy play from a trained table
pub mod policy {
    pub mod trained_policy;
}

// Re-export common types for convenience
pub use actions::nim_move::Move;
pub use learning::q_table::QTable;
pub use learning::serialization::{SerializableQTable, SerializableEntry};
pub use policy::trained_policy::TrainedPolicy;
