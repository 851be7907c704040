use std::collections::BTreeSet;

use chrono::{NaiveDateTime, Timelike};
use tracing::debug;

use crate::models::{RecordTable, TimeAxes};
use crate::utils::constants::{TIMESTAMP_FORMAT, UTC_MARKER};

/// One table row with its timestamp resolved to the dataset's two axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexedRow {
    pub date: chrono::NaiveDate,
    pub hour: u32,
    pub row: usize,
}

/// The surviving rows of a table plus the axes they span.
#[derive(Debug, Clone)]
pub struct TemporalIndex {
    pub rows: Vec<IndexedRow>,
    pub axes: TimeAxes,
}

pub struct TemporalIndexBuilder;

impl TemporalIndexBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Fuse each row's date and UTC-hour fields into a timestamp and derive
    /// the sorted distinct date and hour axes. Rows whose timestamp cannot
    /// be resolved are dropped entirely: they contribute neither axis values
    /// nor grid cells.
    pub fn build(&self, table: &RecordTable) -> TemporalIndex {
        let mut rows = Vec::with_capacity(table.rows.len());
        let mut dates = BTreeSet::new();
        let mut hours = BTreeSet::new();
        let mut dropped = 0usize;

        for (i, _) in table.rows.iter().enumerate() {
            let parsed = table
                .cell(i, table.date_index)
                .zip(table.cell(i, table.hour_index))
                .and_then(|(date, hour)| parse_timestamp(date, hour));

            match parsed {
                Some(timestamp) => {
                    let date = timestamp.date();
                    let hour = timestamp.hour();
                    dates.insert(date);
                    hours.insert(hour);
                    rows.push(IndexedRow { date, hour, row: i });
                }
                None => dropped += 1,
            }
        }

        if dropped > 0 {
            debug!("dropped {} row(s) with unresolvable timestamps", dropped);
        }

        TemporalIndex {
            rows,
            axes: TimeAxes {
                dates: dates.into_iter().collect(),
                hours: hours.into_iter().collect(),
            },
        }
    }
}

impl Default for TemporalIndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse `"{date} {hour}"` after stripping the UTC marker from the hour
/// token, under the fixed `%Y/%m/%d %H%M` format.
fn parse_timestamp(date: &str, hour: &str) -> Option<NaiveDateTime> {
    let hour_clean = hour.replace(UTC_MARKER, "");
    let fused = format!("{} {}", date.trim(), hour_clean.trim());
    NaiveDateTime::parse_from_str(&fused, TIMESTAMP_FORMAT).ok()
}
