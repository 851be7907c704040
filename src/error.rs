use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("no candidate encoding could decode {}", path.display())]
    EncodingFailure { path: PathBuf },

    #[error("{} is truncated: expected metadata preamble, header and data lines", path.display())]
    TruncatedFile { path: PathBuf },

    #[error("no date or hour column could be identified in {}", path.display())]
    MissingEssentialColumns { path: PathBuf },

    #[error("could not parse {field} from '{value}'")]
    CoordinateParseFailure { field: &'static str, value: String },

    #[error("filename '{name}' does not match the station naming convention")]
    FilePatternMismatch { name: String },

    #[error("NetCDF error: {0}")]
    Netcdf(#[from] netcdf::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}
