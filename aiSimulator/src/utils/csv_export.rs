use std::path::Path;
use serde::Serialize;
use tracing::info;

use crate::ai::learning::q_table::QTable;
use crate::core::errors::NimError;
use crate::utils::logging::{self, FileIOType, OperationCategory};

/// One row of the Q-value export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QValueRecord {
    /// Pile counts, space separated (e.g. "1 3 5 7")
    pub piles: String,
    pub pile: usize,
    pub count: u32,
    pub value: f64,
    /// Whether greedy play picks this move from these piles
    pub greedy: bool,
}

pub fn q_value_records(table: &QTable) -> Result<Vec<QValueRecord>, NimError> {
    let mut records = Vec::with_capacity(table.len());
    for (piles, action, value) in table.sorted_entries() {
        let greedy = table.choose_move(&piles)? == action;
        records.push(QValueRecord {
            piles: piles
                .counts()
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" "),
            pile: action.pile,
            count: action.count,
            value,
            greedy,
        });
    }
    Ok(records)
}

/// Write every stored Q-value to a CSV file, one row per `(piles, move)`.
pub fn export_q_values(table: &QTable, path: impl AsRef<Path>) -> Result<usize, NimError> {
    let path = path.as_ref();
    let _timing = logging::start_timing("export_q_values",
        OperationCategory::FileIO { subcategory: FileIOType::CsvExport });

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let records = q_value_records(table)?;
    let mut writer = csv::Writer::from_path(path).map_err(csv_to_io)?;
    for record in &records {
        writer.serialize(record).map_err(csv_to_io)?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = records.len(), "exported q-values");
    Ok(records.len())
}

fn csv_to_io(err: csv::Error) -> NimError {
    NimError::Io(std::io::Error::new(std::io::ErrorKind::Other, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::actions::nim_move::Move;
    use crate::core::game_state::Piles;

    #[test]
    fn marks_greedy_rows() {
        let mut table = QTable::new(1.0, 0.0).unwrap();
        let piles = Piles::from([1, 2]);
        table.update_q_value(&piles, Move::new(0, 1), 0.0, 0.5, 0.0);
        table.update_q_value(&piles, Move::new(1, 2), 0.0, -1.0, 0.0);

        let records = q_value_records(&table).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].piles, "1 2");
        assert!(records[0].greedy);
        assert!(!records[1].greedy);
    }
}
