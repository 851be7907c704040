use std::borrow::Cow;
use std::path::Path;

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use tracing::debug;

use crate::error::{ProcessingError, Result};
use crate::utils::constants::{FIELD_DELIMITER, PREAMBLE_LINES};

/// Candidate encodings, probed in order. UTF-8 goes first because it is
/// self-validating; Windows-1252 covers the latin1/cp1252 exports and
/// accepts any byte sequence.
static ENCODING_CANDIDATES: [&Encoding; 2] = [UTF_8, WINDOWS_1252];

/// A station file split into its three sections, every line already split
/// on the field delimiter.
#[derive(Debug, Clone)]
pub struct ParsedStationFile {
    /// The fixed-length metadata preamble (`KEY;VALUE[;...]` lines).
    pub preamble: Vec<Vec<String>>,
    /// The column header line.
    pub header: Vec<String>,
    /// The observation rows.
    pub records: Vec<Vec<String>>,
}

pub struct StationFileParser;

impl StationFileParser {
    pub fn new() -> Self {
        Self
    }

    /// Read and parse a station file from disk. The file is loaded whole;
    /// the encoding fallback needs the full byte buffer.
    pub fn parse_file(&self, path: &Path) -> Result<ParsedStationFile> {
        let bytes = std::fs::read(path)?;
        self.parse_bytes(&bytes, path)
    }

    /// Parse a station file from raw bytes.
    pub fn parse_bytes(&self, bytes: &[u8], path: &Path) -> Result<ParsedStationFile> {
        let text = self.decode(bytes, path)?;
        let mut lines = text.lines();

        let mut preamble = Vec::with_capacity(PREAMBLE_LINES);
        for _ in 0..PREAMBLE_LINES {
            let line = lines.next().ok_or_else(|| ProcessingError::TruncatedFile {
                path: path.to_path_buf(),
            })?;
            preamble.push(split_fields(line));
        }

        let header_line = lines.next().ok_or_else(|| ProcessingError::TruncatedFile {
            path: path.to_path_buf(),
        })?;
        let header = split_fields(header_line);

        let data_section: String = lines.collect::<Vec<_>>().join("\n");
        let records = parse_records(&data_section)?;

        Ok(ParsedStationFile {
            preamble,
            header,
            records,
        })
    }

    /// Decode bytes with the canonical candidate order, accepting the first
    /// encoding that reports no errors.
    fn decode<'a>(&self, bytes: &'a [u8], path: &Path) -> Result<Cow<'a, str>> {
        for encoding in ENCODING_CANDIDATES {
            let (text, _, had_errors) = encoding.decode(bytes);
            if !had_errors {
                debug!("decoded {} as {}", path.display(), encoding.name());
                return Ok(text);
            }
        }

        Err(ProcessingError::EncodingFailure {
            path: path.to_path_buf(),
        })
    }
}

impl Default for StationFileParser {
    fn default() -> Self {
        Self::new()
    }
}

fn split_fields(line: &str) -> Vec<String> {
    line.trim_end_matches('\r')
        .split(FIELD_DELIMITER as char)
        .map(|f| f.to_string())
        .collect()
}

/// Parse the data section with the csv reader. Records may have varying
/// field counts (trailing delimiters are common); the reader is flexible
/// and empty lines are dropped.
fn parse_records(section: &str) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .has_headers(false)
        .flexible(true)
        .from_reader(section.as_bytes());

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        records.push(record.iter().map(|f| f.to_string()).collect());
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
REGIAO:;CO
UF:;DF
ESTACAO:;BRASILIA
CODIGO (WMO):;A001
LATITUDE:;-15,78961111
LONGITUDE:;-47,92580555
ALTITUDE:;1160,96
DATA DE FUNDACAO:;07/05/00
Data;Hora UTC;TEMPERATURA DO AR - BULBO SECO, HORARIA (°C);UMIDADE RELATIVA DO AR, HORARIA (%);
2024/01/01;0000 UTC;25,4;68;
2024/01/01;0100 UTC;24,9;70;
";

    #[test]
    fn test_parse_sections() {
        let parser = StationFileParser::new();
        let parsed = parser
            .parse_bytes(SAMPLE.as_bytes(), Path::new("INMET_CO_DF_A001_BRASILIA_X_A_Y.CSV"))
            .unwrap();

        assert_eq!(parsed.preamble.len(), 8);
        assert_eq!(parsed.preamble[0], vec!["REGIAO:", "CO"]);
        assert_eq!(parsed.header[0], "Data");
        assert_eq!(parsed.header[1], "Hora UTC");
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0][2], "25,4");
    }

    #[test]
    fn test_latin1_bytes_decode_via_fallback() {
        // "TEMPERATURA (°C)" with a latin1-encoded degree sign is invalid UTF-8
        let mut bytes = SAMPLE.replace("(°C)", "(~C)").into_bytes();
        let pos = bytes.iter().position(|&b| b == b'~').unwrap();
        bytes[pos] = 0xB0;

        let parser = StationFileParser::new();
        let parsed = parser
            .parse_bytes(&bytes, Path::new("INMET_CO_DF_A001_BRASILIA_X_A_Y.CSV"))
            .unwrap();

        assert!(parsed.header[2].contains('°'));
    }

    #[test]
    fn test_utf8_preferred_when_valid() {
        let parser = StationFileParser::new();
        let parsed = parser
            .parse_bytes(SAMPLE.as_bytes(), Path::new("x.CSV"))
            .unwrap();

        // The multi-byte degree sign survives intact rather than being
        // read as two Windows-1252 characters
        assert!(parsed.header[2].contains("(°C)"));
    }

    #[test]
    fn test_truncated_file() {
        let parser = StationFileParser::new();
        let err = parser
            .parse_bytes(b"REGIAO:;CO\nUF:;DF\n", Path::new("short.CSV"))
            .unwrap_err();
        assert!(matches!(err, ProcessingError::TruncatedFile { .. }));
    }

    #[test]
    fn test_empty_data_lines_dropped() {
        let sample = format!("{}\n\n   \n", SAMPLE);
        let parser = StationFileParser::new();
        let parsed = parser.parse_bytes(sample.as_bytes(), Path::new("x.CSV")).unwrap();
        assert_eq!(parsed.records.len(), 2);
    }
}
