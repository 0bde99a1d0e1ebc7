// Main module declarations for the Nim learner

// Game engine and training loop
pub mod core {
    pub mod errors;
    pub mod game_state;
    pub mod engine;
    pub mod episode;
    pub mod training;
}

// AI components
pub mod ai;

// Configuration modules
pub mod config {
    pub mod constants;
    pub mod training_config;
}

// Analysis of learned policies
pub mod analysis {
    pub mod evaluation;
}

// Utility functions
pub mod utils {
    pub mod logging;
    pub mod csv_export;
    pub mod traits;
}

// CLI interface
pub mod cli {
    pub mod cli;
    pub mod play;
}

// Re-export commonly used modules
pub use crate::core::engine;
pub use crate::core::errors::{InvalidMoveError, ModelLoadError, NimError};
pub use crate::core::game_state::{GameState, Piles, Player};
pub use crate::core::training::run_training;
pub use crate::ai::{Move, QTable, TrainedPolicy};
pub use crate::config::training_config::TrainingConfig;
