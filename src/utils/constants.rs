/// Input file conventions
pub const INPUT_FILE_PREFIX: &str = "INMET_";
pub const INPUT_EXTENSION: &str = "csv";
pub const MIN_FILENAME_SEGMENTS: usize = 5;

/// Output conventions
pub const OUTPUT_DIR_NAME: &str = "NETCDF";
pub const OUTPUT_EXTENSION: &str = "nc";

/// File structure
pub const FIELD_DELIMITER: u8 = b';';
pub const PREAMBLE_LINES: usize = 8;

/// Missing-value sentinels (besides empty/whitespace-only cells)
pub const MISSING_SENTINELS: [&str; 3] = ["NULL", "null", "-9999"];

/// Header role markers, matched by substring
pub const DATE_MARKER: &str = "Data";
pub const HOUR_MARKER: &str = "Hora";
pub const UTC_MARKER: &str = "UTC";

/// Timestamp formats
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H%M";
pub const CREATION_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Metadata preamble keys
pub const KEY_REGION: &str = "REGIAO";
pub const KEY_UF: &str = "UF";
pub const KEY_WMO: &str = "CODIGO (WMO)";
pub const KEY_STATION: &str = "ESTACAO";
pub const KEY_LATITUDE: &str = "LATITUDE";
pub const KEY_LONGITUDE: &str = "LONGITUDE";
pub const KEY_ALTITUDE: &str = "ALTITUDE";
pub const KEY_FOUNDING_DATE: &str = "DATA DE FUNDACAO";
pub const UNKNOWN_FIELD: &str = "Unknown";

/// Variable-name sanitization
pub const DIGIT_PREFIX: &str = "var_";
pub const EMPTY_NAME_PLACEHOLDER: &str = "unknown_variable";

/// Provenance attributes
pub const SOURCE_TAG: &str = "INMET";
pub const INSTITUTION: &str = "Instituto Nacional de Meteorologia (INMET)";
pub const CONVENTIONS: &str = "CF-1.8";
