use chrono::{DateTime, NaiveDate, Utc};
use ndarray::Array2;

use crate::models::StationIdentity;
use crate::utils::constants::{CONVENTIONS, INSTITUTION, SOURCE_TAG, UNKNOWN_FIELD};

/// The two real axes of a station dataset: sorted distinct observation
/// dates and sorted distinct UTC hours-of-day. Derived only from rows with
/// a resolvable timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeAxes {
    pub dates: Vec<NaiveDate>,
    pub hours: Vec<u32>,
}

impl TimeAxes {
    pub fn shape(&self) -> (usize, usize) {
        (self.dates.len(), self.hours.len())
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() || self.hours.is_empty()
    }
}

/// Provenance attributes stamped onto every persisted dataset.
#[derive(Debug, Clone)]
pub struct Provenance {
    pub source: String,
    pub title: String,
    pub institution: String,
    pub conventions: String,
    pub founding_date: String,
    pub created: DateTime<Utc>,
}

/// A fully assembled station dataset: identity, time axes, one dense
/// `(dates, hours)` grid per sanitized variable name, and provenance.
/// Immutable after assembly; persisted exactly once.
#[derive(Debug, Clone)]
pub struct GriddedDataset {
    identity: StationIdentity,
    axes: TimeAxes,
    variables: Vec<(String, Array2<f64>)>,
    provenance: Provenance,
}

impl GriddedDataset {
    /// Assemble a dataset from already-validated parts. Pure assembly: the
    /// grids are expected to be shaped `(axes.dates.len(), axes.hours.len())`
    /// and keyed by sanitized names.
    pub fn new(
        identity: StationIdentity,
        axes: TimeAxes,
        variables: Vec<(String, Array2<f64>)>,
    ) -> Self {
        let provenance = Provenance {
            source: SOURCE_TAG.to_string(),
            title: format!("Dados meteorológicos horários - {}", identity.station_name),
            institution: INSTITUTION.to_string(),
            conventions: CONVENTIONS.to_string(),
            founding_date: identity
                .founding_date
                .clone()
                .unwrap_or_else(|| UNKNOWN_FIELD.to_string()),
            created: Utc::now(),
        };

        Self {
            identity,
            axes,
            variables,
            provenance,
        }
    }

    pub fn identity(&self) -> &StationIdentity {
        &self.identity
    }

    pub fn axes(&self) -> &TimeAxes {
        &self.axes
    }

    pub fn variables(&self) -> &[(String, Array2<f64>)] {
        &self.variables
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> StationIdentity {
        StationIdentity::new(
            "CO".to_string(),
            "DF".to_string(),
            "A001".to_string(),
            "BRASILIA".to_string(),
            -15.789611,
            -47.925806,
            1160.96,
            Some("2000-05-07".to_string()),
        )
    }

    #[test]
    fn test_provenance_attributes() {
        let axes = TimeAxes {
            dates: vec![NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()],
            hours: vec![0, 12],
        };
        let grid = Array2::from_elem((1, 2), 1.5);
        let dataset = GriddedDataset::new(identity(), axes, vec![("temp".to_string(), grid)]);

        let provenance = dataset.provenance();
        assert_eq!(provenance.source, "INMET");
        assert_eq!(provenance.conventions, "CF-1.8");
        assert_eq!(provenance.founding_date, "2000-05-07");
        assert!(provenance.title.contains("BRASILIA"));
    }

    #[test]
    fn test_missing_founding_date_reads_unknown() {
        let mut id = identity();
        id.founding_date = None;
        let axes = TimeAxes {
            dates: vec![],
            hours: vec![],
        };
        let dataset = GriddedDataset::new(id, axes, vec![]);

        assert_eq!(dataset.provenance().founding_date, "Unknown");
        assert!(dataset.axes().is_empty());
    }
}
