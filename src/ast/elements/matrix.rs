//! Matrix element
//!
//! A 2-D grid of cell slots with explicit row/column bookkeeping. Cells can
//! be empty (a row shorter than the widest row, or a child the parser could
//! not produce).

use crate::ast::node::NodeId;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MatrixNode {
    /// Row-major cell slots.
    pub rows: Vec<Vec<Option<NodeId>>>,
    /// First row holds column names.
    pub col_names: bool,
    /// First column holds row names.
    pub row_names: bool,
    /// Rendered without the usual matrix parentheses.
    pub special: bool,
    /// Inference-rule presentation; implies `special`.
    pub inference: bool,
}

impl MatrixNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new (empty) row.
    pub fn new_row(&mut self) {
        self.rows.push(Vec::new());
    }

    /// Add a cell slot to the current row.
    pub fn push_cell(&mut self, cell: Option<NodeId>) {
        if self.rows.is_empty() {
            self.rows.push(Vec::new());
        }
        self.rows
            .last_mut()
            .expect("push_cell on empty row list")
            .push(cell);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row.
    pub fn col_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<NodeId> {
        self.rows.get(row)?.get(col).copied().flatten()
    }

    /// All occupied cell slots in row-major order, with their coordinates.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, NodeId)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(c, cell)| cell.map(|id| (r, c, id)))
        })
    }
}
