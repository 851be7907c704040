use std::path::{Path, PathBuf};

use crate::error::{ProcessingError, Result};
use crate::utils::constants::{
    INPUT_EXTENSION, INPUT_FILE_PREFIX, MIN_FILENAME_SEGMENTS, OUTPUT_DIR_NAME, OUTPUT_EXTENSION,
};

/// Identity fields encoded in a station filename.
///
/// Expected stem pattern: `INMET_REGION_UF_WMOCODE_STATIONNAME_...`
/// (e.g. `INMET_CO_DF_A001_BRASILIA_01-01-2024_A_31-12-2024`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationFilename {
    pub region: String,
    pub uf: String,
    pub wmo_code: String,
    pub station_name: String,
}

/// Check whether a path looks like a station export file: `INMET_` prefix
/// and a `csv` extension, extension matched case-insensitively.
pub fn is_station_file(path: &Path) -> bool {
    let has_prefix = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with(INPUT_FILE_PREFIX))
        .unwrap_or(false);

    let has_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(INPUT_EXTENSION))
        .unwrap_or(false);

    has_prefix && has_extension
}

/// Parse the identity segments out of a station filename.
///
/// Fails with `FilePatternMismatch` when the stem has fewer than the
/// required number of underscore-delimited segments; callers treat that as
/// a signal to fall back to the metadata preamble, not as a fatal error.
pub fn parse_station_filename(path: &Path) -> Result<StationFilename> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ProcessingError::FilePatternMismatch {
            name: path.display().to_string(),
        })?;

    let segments: Vec<&str> = stem.split('_').collect();
    if segments.len() < MIN_FILENAME_SEGMENTS {
        return Err(ProcessingError::FilePatternMismatch {
            name: stem.to_string(),
        });
    }

    Ok(StationFilename {
        region: segments[1].to_uppercase(),
        uf: segments[2].to_uppercase(),
        wmo_code: segments[3].to_uppercase(),
        station_name: segments[4].to_string(),
    })
}

/// Output directory for a given input directory: a sibling `NETCDF/` folder
/// under the input directory's parent.
pub fn output_dir_for(input_dir: &Path) -> PathBuf {
    input_dir
        .parent()
        .unwrap_or(input_dir)
        .join(OUTPUT_DIR_NAME)
}

/// Output artifact path for an input file: same stem, `.nc` extension,
/// inside the given output directory.
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_default();
    output_dir.join(stem).with_extension(OUTPUT_EXTENSION)
}
