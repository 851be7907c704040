/// Row-oriented observation table for one station file.
///
/// Cells are `None` when the source value hit the missing-value sentinel
/// set, otherwise the trimmed text with the decimal comma already converted
/// to a point. Column labels are the raw header text; the date and UTC-hour
/// roles are tracked by index rather than by renaming.
#[derive(Debug, Clone)]
pub struct RecordTable {
    pub columns: Vec<String>,
    pub date_index: usize,
    pub hour_index: usize,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RecordTable {
    /// Iterate the variable columns (everything except the two role
    /// columns), yielding `(column_index, raw_label)` in header order.
    pub fn variable_columns(&self) -> impl Iterator<Item = (usize, &str)> {
        let date_index = self.date_index;
        let hour_index = self.hour_index;
        self.columns
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != date_index && *i != hour_index)
            .map(|(i, label)| (i, label.as_str()))
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column)?.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_columns_skip_roles() {
        let table = RecordTable {
            columns: vec![
                "Data".to_string(),
                "Hora UTC".to_string(),
                "TEMP (°C)".to_string(),
                "UMIDADE (%)".to_string(),
            ],
            date_index: 0,
            hour_index: 1,
            rows: vec![],
        };

        let vars: Vec<_> = table.variable_columns().collect();
        assert_eq!(vars, vec![(2, "TEMP (°C)"), (3, "UMIDADE (%)")]);
    }
}
