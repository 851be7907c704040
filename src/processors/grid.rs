use std::collections::HashMap;

use ndarray::Array2;

use crate::models::RecordTable;
use crate::processors::temporal::TemporalIndex;

pub struct GridAssembler;

impl GridAssembler {
    pub fn new() -> Self {
        Self
    }

    /// Build one dense `(dates, hours)` grid per variable column, in header
    /// order, keyed by the raw label.
    ///
    /// A single `(date, hour) -> row` index is built once; each grid fill is
    /// then O(rows). Duplicate timestamps keep the first occurrence. Cells
    /// with no backing row, a missing value, or a non-numeric value stay NaN.
    pub fn assemble(
        &self,
        table: &RecordTable,
        index: &TemporalIndex,
    ) -> Vec<(String, Array2<f64>)> {
        let (n_dates, n_hours) = index.axes.shape();

        let date_pos: HashMap<_, _> = index
            .axes
            .dates
            .iter()
            .enumerate()
            .map(|(i, d)| (*d, i))
            .collect();
        let hour_pos: HashMap<_, _> = index
            .axes
            .hours
            .iter()
            .enumerate()
            .map(|(j, h)| (*h, j))
            .collect();

        // First occurrence wins for duplicate (date, hour) keys
        let mut cell_to_row: HashMap<(usize, usize), usize> = HashMap::new();
        for indexed in &index.rows {
            if let (Some(&i), Some(&j)) = (date_pos.get(&indexed.date), hour_pos.get(&indexed.hour))
            {
                cell_to_row.entry((i, j)).or_insert(indexed.row);
            }
        }

        table
            .variable_columns()
            .map(|(column, label)| {
                let mut grid = Array2::from_elem((n_dates, n_hours), f64::NAN);
                for (&(i, j), &row) in &cell_to_row {
                    if let Some(value) = table.cell(row, column).and_then(|v| v.parse::<f64>().ok())
                    {
                        grid[[i, j]] = value;
                    }
                }
                (label.to_string(), grid)
            })
            .collect()
    }
}

impl Default for GridAssembler {
    fn default() -> Self {
        Self::new()
    }
}
