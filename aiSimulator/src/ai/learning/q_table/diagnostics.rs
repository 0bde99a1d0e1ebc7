// Diagnostic and reporting functions for QTable

use crate::ai::actions::nim_move::Move;
use crate::core::engine::available_moves;
use crate::core::game_state::Piles;
use super::QTable;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableSummary {
    pub states: usize,
    pub entries: usize,
    pub min_value: f64,
    pub max_value: f64,
    pub episodes_trained: u64,
}

impl std::fmt::Display for TableSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} states, {} values in [{:.4}, {:.4}] after {} episodes",
            self.states, self.entries, self.min_value, self.max_value, self.episodes_trained
        )
    }
}

impl QTable {
    pub fn summary(&self) -> TableSummary {
        let (min_value, max_value) = self
            .sorted_entries()
            .iter()
            .map(|(_, _, value)| *value)
            .fold(None, |range: Option<(f64, f64)>, v| match range {
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
                None => Some((v, v)),
            })
            .unwrap_or((0.0, 0.0));

        TableSummary {
            states: self.state_count(),
            entries: self.len(),
            min_value,
            max_value,
            episodes_trained: self.episodes_trained(),
        }
    }

    /// Moves from `piles` ranked by value, best first. Equal values keep the
    /// greedy tie-break order (later enumerated moves first).
    pub fn top_actions(&self, piles: &Piles, n: usize) -> Vec<(Move, f64)> {
        let mut actions: Vec<_> = available_moves(piles)
            .into_iter()
            .rev()
            .map(|action| (action, self.get_q_value(piles, action)))
            .collect();
        actions.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        actions.truncate(n);
        actions
    }

    pub fn print_top_actions(&self, piles: &Piles, n: usize) {
        println!("\nTop {} actions for {}:", n, piles);
        for (i, (action, value)) in self.top_actions(piles, n).iter().enumerate() {
            println!("{}. {}: {:.4}", i + 1, action, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_of_empty_table() {
        let summary = QTable::default().summary();
        assert_eq!(summary.states, 0);
        assert_eq!(summary.entries, 0);
        assert_eq!(summary.min_value, 0.0);
    }

    #[test]
    fn top_actions_lead_with_greedy_choice() {
        let mut table = QTable::new(1.0, 0.0).unwrap();
        let piles = Piles::from([3]);
        table.update_q_value(&piles, Move::new(0, 2), 0.0, 0.5, 0.0);
        table.update_q_value(&piles, Move::new(0, 3), 0.0, -1.0, 0.0);

        let top = table.top_actions(&piles, 2);
        assert_eq!(top, vec![(Move::new(0, 2), 0.5), (Move::new(0, 1), 0.0)]);
        assert_eq!(top[0].0, table.choose_move(&piles).unwrap());

        let summary = table.summary();
        assert_eq!((summary.states, summary.entries), (1, 2));
        assert_eq!((summary.min_value, summary.max_value), (-1.0, 0.5));
    }
}
