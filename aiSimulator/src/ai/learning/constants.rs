// Constants module for AI learning components
// All constants used by the QTable implementation

use std::sync::atomic::{AtomicBool, Ordering};

//---------------------------------------------------------------------
// Default Values
//---------------------------------------------------------------------
pub const DEFAULT_LEARNING_RATE: f64 = 0.5;
pub const DEFAULT_EXPLORATION_RATE: f64 = 0.1;
pub const DEFAULT_Q_VALUE: f64 = 0.0;

//---------------------------------------------------------------------
// Rewards
//---------------------------------------------------------------------
pub const WIN_REWARD: f64 = 1.0;
pub const LOSS_REWARD: f64 = -1.0;
pub const CONTINUE_REWARD: f64 = 0.0;

/// Value of a position with no moves left.
pub const TERMINAL_FUTURE_REWARD: f64 = 0.0;

//---------------------------------------------------------------------
// Model Format
//---------------------------------------------------------------------
pub const MODEL_FORMAT_VERSION: u32 = 1;

//---------------------------------------------------------------------
// Debug Flags
//---------------------------------------------------------------------
static DEBUG_Q_UPDATES: AtomicBool = AtomicBool::new(false);

pub fn set_debug_q_updates(enabled: bool) {
    DEBUG_Q_UPDATES.store(enabled, Ordering::SeqCst);
}

pub fn is_debug_q_updates_enabled() -> bool {
    DEBUG_Q_UPDATES.load(Ordering::SeqCst)
}
