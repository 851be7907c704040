pub mod dataset;
pub mod outcome;
pub mod station;
pub mod table;

pub use dataset::{GriddedDataset, Provenance, TimeAxes};
pub use outcome::{BatchResult, ConversionOutcome};
pub use station::StationIdentity;
pub use table::RecordTable;
