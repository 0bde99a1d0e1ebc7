// Game Constants
pub const DEFAULT_STARTING_PILES: [u32; 4] = [1, 3, 5, 7];  // Classic Nim opening

// Training Constants
pub const DEFAULT_EPISODES: usize = 10_000;
pub const DEFAULT_CHECKPOINT_INTERVAL: usize = 0;           // 0 disables checkpoints
pub const PROGRESS_BAR_TEMPLATE: &str =
    "{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} episodes ({per_sec}, eta {eta})";
pub const PROGRESS_TICK_INTERVAL: u64 = 100;                // Episodes per progress bar update

// File Locations
pub const DEFAULT_MODEL_PATH: &str = "model.json";
pub const DEFAULT_CHECKPOINT_DIR: &str = "checkpoints";
pub const DEFAULT_EXPORT_PATH: &str = "q_values.csv";

// Evaluation Constants
pub const DEFAULT_EVALUATION_GAMES: usize = 1_000;
pub const PERCENT_CONVERSION: f64 = 100.0;
