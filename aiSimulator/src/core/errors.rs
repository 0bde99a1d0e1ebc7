use std::path::PathBuf;
use crate::core::game_state::Piles;

/// Rejection reasons for a move that is not legal in the state it was applied to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidMoveError {
    /// Pile index outside `[0, pile_count)`.
    InvalidPile { pile: usize, pile_count: usize },
    /// Count outside `[1, pile_size]`.
    InvalidCount { pile: usize, count: u32, pile_size: u32 },
}

impl std::fmt::Display for InvalidMoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidMoveError::InvalidPile { pile, pile_count } => {
                write!(f, "pile out of range: pile {} requested but there are {} piles", pile, pile_count)
            },
            InvalidMoveError::InvalidCount { pile, count, pile_size } => {
                write!(f, "count out of range: cannot take {} from pile {} holding {}", count, pile, pile_size)
            },
        }
    }
}

impl std::error::Error for InvalidMoveError {}

#[derive(Debug)]
pub enum ModelLoadError {
    Io { path: PathBuf, source: std::io::Error },
    Malformed { path: PathBuf, source: serde_json::Error },
    Invalid { path: PathBuf, reason: String },
}

impl std::fmt::Display for ModelLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelLoadError::Io { path, source } => {
                write!(f, "Failed to read model {}: {}", path.display(), source)
            },
            ModelLoadError::Malformed { path, source } => {
                write!(f, "Malformed model {}: {}", path.display(), source)
            },
            ModelLoadError::Invalid { path, reason } => {
                write!(f, "Invalid model {}: {}", path.display(), reason)
            },
        }
    }
}

impl std::error::Error for ModelLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelLoadError::Io { source, .. } => Some(source),
            ModelLoadError::Malformed { source, .. } => Some(source),
            ModelLoadError::Invalid { .. } => None,
        }
    }
}

#[derive(Debug)]
pub enum NimError {
    InvalidMove(InvalidMoveError),
    ModelLoad(ModelLoadError),
    /// An action was requested from a finished game. Callers must check
    /// `game_over` first, so this marks a broken contract rather than bad input.
    EmptyActionSet(Piles),
    InvalidConfig(String),
    Io(std::io::Error),
}

impl From<InvalidMoveError> for NimError {
    fn from(err: InvalidMoveError) -> Self {
        NimError::InvalidMove(err)
    }
}

impl From<ModelLoadError> for NimError {
    fn from(err: ModelLoadError) -> Self {
        NimError::ModelLoad(err)
    }
}

impl From<std::io::Error> for NimError {
    fn from(err: std::io::Error) -> Self {
        NimError::Io(err)
    }
}

impl std::fmt::Display for NimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NimError::InvalidMove(e) => write!(f, "Invalid move: {}", e),
            NimError::ModelLoad(e) => write!(f, "{}", e),
            NimError::EmptyActionSet(piles) => write!(f, "No legal actions from terminal position {}", piles),
            NimError::InvalidConfig(s) => write!(f, "Invalid training configuration: {}", s),
            NimError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for NimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NimError::InvalidMove(e) => Some(e),
            NimError::ModelLoad(e) => Some(e),
            NimError::Io(e) => Some(e),
            NimError::EmptyActionSet(_) | NimError::InvalidConfig(_) => None,
        }
    }
}
