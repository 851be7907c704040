use std::path::Path;

use tracing::debug;

use crate::error::{ProcessingError, Result};
use crate::models::RecordTable;
use crate::utils::constants::{DATE_MARKER, HOUR_MARKER, MISSING_SENTINELS, UTC_MARKER};
use crate::utils::numeric::normalize_decimal;

pub struct RecordTableLoader;

impl RecordTableLoader {
    pub fn new() -> Self {
        Self
    }

    /// Build the observation table from the already-split header and data
    /// records: resolve missing-value sentinels, convert the decimal comma,
    /// drop columns that carry no data at all, and locate the date and
    /// UTC-hour role columns.
    pub fn load(
        &self,
        header: &[String],
        records: &[Vec<String>],
        path: &Path,
    ) -> Result<RecordTable> {
        let width = header.len();

        let mut rows: Vec<Vec<Option<String>>> = Vec::with_capacity(records.len());
        for record in records {
            let mut row = Vec::with_capacity(width);
            for i in 0..width {
                row.push(normalize_cell(record.get(i).map(String::as_str)));
            }
            rows.push(row);
        }

        // Drop columns that are entirely missing (this also removes the
        // phantom column produced by a trailing delimiter)
        let keep: Vec<usize> = (0..width)
            .filter(|&i| rows.iter().any(|row| row[i].is_some()))
            .collect();

        if keep.len() < width {
            debug!(
                "{}: dropped {} empty column(s)",
                path.display(),
                width - keep.len()
            );
        }

        let columns: Vec<String> = keep.iter().map(|&i| header[i].trim().to_string()).collect();
        let rows: Vec<Vec<Option<String>>> = rows
            .into_iter()
            .map(|row| keep.iter().map(|&i| row[i].clone()).collect())
            .collect();

        let date_index = columns.iter().position(|label| label.contains(DATE_MARKER));
        let hour_index = columns
            .iter()
            .position(|label| label.contains(HOUR_MARKER) && label.contains(UTC_MARKER));

        let (date_index, hour_index) = match (date_index, hour_index) {
            (Some(d), Some(h)) => (d, h),
            _ => {
                return Err(ProcessingError::MissingEssentialColumns {
                    path: path.to_path_buf(),
                })
            }
        };

        Ok(RecordTable {
            columns,
            date_index,
            hour_index,
            rows,
        })
    }
}

impl Default for RecordTableLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve one raw cell: `None` for the missing-value sentinel set (empty,
/// whitespace-only, NULL tokens, -9999), otherwise the trimmed text with
/// the decimal comma converted.
fn normalize_cell(raw: Option<&str>) -> Option<String> {
    let raw = raw?.trim();
    if raw.is_empty() || MISSING_SENTINELS.contains(&raw) {
        return None;
    }
    Some(normalize_decimal(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> Vec<String> {
        vec![
            "Data".to_string(),
            "Hora UTC".to_string(),
            "TEMPERATURA DO AR - BULBO SECO, HORARIA (°C)".to_string(),
            "RADIACAO GLOBAL (Kj/m²)".to_string(),
            "".to_string(),
        ]
    }

    fn records() -> Vec<Vec<String>> {
        vec![
            vec![
                "2024/01/01".into(),
                "0000 UTC".into(),
                "25,4".into(),
                "-9999".into(),
                "".into(),
            ],
            vec![
                "2024/01/01".into(),
                "0100 UTC".into(),
                "NULL".into(),
                "-9999".into(),
                "".into(),
            ],
        ]
    }

    #[test]
    fn test_sentinels_and_decimal_conversion() {
        let loader = RecordTableLoader::new();
        let table = loader
            .load(&header(), &records(), Path::new("x.CSV"))
            .unwrap();

        assert_eq!(table.cell(0, 2), Some("25.4"));
        assert_eq!(table.cell(1, 2), None);
    }

    #[test]
    fn test_all_missing_columns_dropped() {
        let loader = RecordTableLoader::new();
        let table = loader
            .load(&header(), &records(), Path::new("x.CSV"))
            .unwrap();

        // The all--9999 radiation column and the trailing phantom column
        // are gone
        assert_eq!(
            table.columns,
            vec![
                "Data",
                "Hora UTC",
                "TEMPERATURA DO AR - BULBO SECO, HORARIA (°C)"
            ]
        );
        assert_eq!(table.rows[0].len(), 3);
    }

    #[test]
    fn test_role_detection() {
        let loader = RecordTableLoader::new();
        let table = loader
            .load(&header(), &records(), Path::new("x.CSV"))
            .unwrap();

        assert_eq!(table.date_index, 0);
        assert_eq!(table.hour_index, 1);
    }

    #[test]
    fn test_missing_roles_are_fatal() {
        let header = vec!["Timestamp".to_string(), "TEMP".to_string()];
        let records = vec![vec!["2024/01/01".to_string(), "25,4".to_string()]];

        let loader = RecordTableLoader::new();
        let err = loader
            .load(&header, &records, Path::new("x.CSV"))
            .unwrap_err();
        assert!(matches!(
            err,
            ProcessingError::MissingEssentialColumns { .. }
        ));
    }

    #[test]
    fn test_short_records_padded_with_missing() {
        let header = vec![
            "Data".to_string(),
            "Hora UTC".to_string(),
            "TEMP (°C)".to_string(),
        ];
        let records = vec![vec!["2024/01/01".to_string(), "0000".to_string()]];

        let loader = RecordTableLoader::new();
        let table = loader.load(&header, &records, Path::new("x.CSV")).unwrap();

        // Column kept only if some row has data; TEMP is all-missing here
        assert_eq!(table.columns.len(), 2);
        assert_eq!(table.rows[0].len(), 2);
    }
}
