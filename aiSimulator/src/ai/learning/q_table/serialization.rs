//! Serialization module for QTable
//!
//! Models are written as pretty JSON. Loading validates the whole document
//! before a table is built, so a truncated or inconsistent file never yields
//! a partially filled table.

use std::collections::HashMap;
use std::path::Path;
use tracing::info;
use crate::ai::actions::nim_move::Move;
use crate::ai::learning::constants::MODEL_FORMAT_VERSION;
use crate::ai::learning::serialization::{SerializableEntry, SerializableQTable};
use crate::core::engine::validate_move;
use crate::core::errors::ModelLoadError;
use crate::utils::logging::{self, FileIOType, OperationCategory};
use super::core::{validate_exploration_rate, validate_learning_rate};
use super::QTable;

impl From<&QTable> for SerializableQTable {
    fn from(table: &QTable) -> Self {
        let entries = table
            .sorted_entries()
            .into_iter()
            .map(|(piles, action, value)| SerializableEntry {
                piles,
                pile: action.pile,
                count: action.count,
                value,
            })
            .collect();

        SerializableQTable {
            format_version: MODEL_FORMAT_VERSION,
            learning_rate: table.learning_rate(),
            exploration_rate: table.exploration_rate(),
            episodes_trained: table.episodes_trained(),
            entries,
        }
    }
}

impl SerializableQTable {
    /// Build a table, rejecting anything a trained model could not contain.
    pub fn into_table(self) -> Result<QTable, String> {
        if self.format_version != MODEL_FORMAT_VERSION {
            return Err(format!(
                "unsupported format version {} (expected {})",
                self.format_version, MODEL_FORMAT_VERSION
            ));
        }
        validate_learning_rate(self.learning_rate).map_err(|e| e.to_string())?;
        validate_exploration_rate(self.exploration_rate).map_err(|e| e.to_string())?;

        let mut q: HashMap<_, HashMap<Move, f64>> = HashMap::new();
        for (i, entry) in self.entries.into_iter().enumerate() {
            let action = Move::new(entry.pile, entry.count);
            validate_move(&entry.piles, action)
                .map_err(|e| format!("entry {} ({} at {}): {}", i, action, entry.piles, e))?;
            if !entry.value.is_finite() {
                return Err(format!("entry {} has non-finite value {}", i, entry.value));
            }
            if q.entry(entry.piles.clone()).or_default().insert(action, entry.value).is_some() {
                return Err(format!("duplicate entry {} for {} at {}", i, action, entry.piles));
            }
        }

        Ok(QTable::from_parts(
            q,
            self.learning_rate,
            self.exploration_rate,
            self.episodes_trained,
        ))
    }
}

impl QTable {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&SerializableQTable::from(self))
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let path = path.as_ref();
        let _timing = logging::start_timing("save_to_file",
            OperationCategory::FileIO { subcategory: FileIOType::ModelSave });

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = self
            .to_json()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, json)?;

        info!(path = %path.display(), entries = self.len(), "saved model");
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ModelLoadError> {
        let path = path.as_ref();
        let _timing = logging::start_timing("load_from_file",
            OperationCategory::FileIO { subcategory: FileIOType::ModelLoad });

        let json = std::fs::read_to_string(path).map_err(|source| ModelLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_json_str(&json, path)?;

        info!(path = %path.display(), entries = table.len(), episodes = table.episodes_trained(), "loaded model");
        Ok(table)
    }

    /// Decode a model; `path` only labels errors.
    pub fn from_json_str(json: &str, path: impl AsRef<Path>) -> Result<Self, ModelLoadError> {
        let path = path.as_ref();
        let serializable: SerializableQTable =
            serde_json::from_str(json).map_err(|source| ModelLoadError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;
        serializable.into_table().map_err(|reason| ModelLoadError::Invalid {
            path: path.to_path_buf(),
            reason,
        })
    }
}
