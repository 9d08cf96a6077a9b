//! Sparse depth × time sample grids.

use serde::{Deserialize, Serialize};

use crate::error::{ProfileError, ProfileResult};

/// A 2D grid of optional readings.
///
/// Rows are depth levels (top to bottom), columns are observations in time
/// order. `None` marks an absent cell. Every row has the same length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Option<f64>>>", into = "Vec<Vec<Option<f64>>>")]
pub struct SampleGrid {
    rows: Vec<Vec<Option<f64>>>,
}

impl SampleGrid {
    /// Build a grid from rows, rejecting rows of unequal length.
    pub fn from_rows(rows: Vec<Vec<Option<f64>>>) -> ProfileResult<Self> {
        if let Some(first) = rows.first() {
            let expected = first.len();
            for (row, cells) in rows.iter().enumerate() {
                if cells.len() != expected {
                    return Err(ProfileError::RaggedGrid {
                        row,
                        expected,
                        actual: cells.len(),
                    });
                }
            }
        }
        Ok(Self { rows })
    }

    /// Build a grid where every cell is present.
    pub fn from_values(rows: Vec<Vec<f64>>) -> ProfileResult<Self> {
        Self::from_rows(
            rows.into_iter()
                .map(|row| row.into_iter().map(Some).collect())
                .collect(),
        )
    }

    /// Build a grid with `row_count` empty rows, to be filled column by column.
    pub fn with_empty_rows(row_count: usize) -> Self {
        Self {
            rows: vec![Vec::new(); row_count],
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Vec<Option<f64>>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell value; absent cells and out-of-range indices both yield `None`.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.rows.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Append one column, one cell per row.
    pub fn push_column(&mut self, column: impl IntoIterator<Item = Option<f64>>) {
        let mut pushed = 0;
        for (row, cell) in self.rows.iter_mut().zip(column) {
            row.push(cell);
            pushed += 1;
        }
        debug_assert_eq!(pushed, self.rows.len());
    }
}

impl TryFrom<Vec<Vec<Option<f64>>>> for SampleGrid {
    type Error = ProfileError;

    fn try_from(rows: Vec<Vec<Option<f64>>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<SampleGrid> for Vec<Vec<Option<f64>>> {
    fn from(grid: SampleGrid) -> Self {
        grid.rows
    }
}
