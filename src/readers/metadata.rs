use std::collections::HashMap;
use std::path::Path;

use tracing::warn;

use crate::error::Result;
use crate::models::StationIdentity;
use crate::utils::constants::{
    KEY_ALTITUDE, KEY_FOUNDING_DATE, KEY_LATITUDE, KEY_LONGITUDE, KEY_REGION, KEY_STATION, KEY_UF,
    KEY_WMO, UNKNOWN_FIELD,
};
use crate::utils::filename::parse_station_filename;
use crate::utils::numeric::parse_coordinate;

pub struct MetadataExtractor;

impl MetadataExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Derive the station identity, preferring the filename segments and
    /// falling back to the metadata preamble when the filename does not
    /// follow the naming convention. Coordinates always come from the
    /// preamble; a missing or unparsable coordinate is fatal for the file.
    pub fn extract(&self, path: &Path, preamble: &[Vec<String>]) -> Result<StationIdentity> {
        let keys = preamble_map(preamble);

        let (region, uf, wmo_code, station_name) = match parse_station_filename(path) {
            Ok(parsed) => (
                parsed.region,
                parsed.uf,
                parsed.wmo_code,
                parsed.station_name,
            ),
            Err(e) => {
                warn!("{}; falling back to preamble identity", e);
                (
                    lookup(&keys, KEY_REGION),
                    lookup(&keys, KEY_UF),
                    lookup(&keys, KEY_WMO),
                    lookup(&keys, KEY_STATION),
                )
            }
        };

        let latitude = parse_coordinate("latitude", coordinate_value(&keys, KEY_LATITUDE))?;
        let longitude = parse_coordinate("longitude", coordinate_value(&keys, KEY_LONGITUDE))?;
        let altitude_m = parse_coordinate("altitude", coordinate_value(&keys, KEY_ALTITUDE))?;

        let founding_date = keys.get(KEY_FOUNDING_DATE).cloned();

        Ok(StationIdentity::new(
            region,
            uf,
            wmo_code,
            station_name,
            latitude,
            longitude,
            altitude_m,
            founding_date,
        ))
    }
}

impl Default for MetadataExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a key/value map from the preamble lines. Keys are declared with a
/// trailing colon in the source format (`REGIAO:;CO`), which is stripped.
fn preamble_map(preamble: &[Vec<String>]) -> HashMap<String, String> {
    let mut map = HashMap::with_capacity(preamble.len());

    for fields in preamble {
        if fields.len() >= 2 {
            let key = fields[0].trim().trim_end_matches(':').to_string();
            let value = fields[1].trim().to_string();
            map.insert(key, value);
        }
    }

    map
}

fn lookup(keys: &HashMap<String, String>, key: &str) -> String {
    keys.get(key)
        .cloned()
        .unwrap_or_else(|| UNKNOWN_FIELD.to_string())
}

fn coordinate_value<'a>(keys: &'a HashMap<String, String>, key: &str) -> &'a str {
    keys.get(key).map(String::as_str).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcessingError;

    fn preamble() -> Vec<Vec<String>> {
        vec![
            vec!["REGIAO:".into(), "CO".into()],
            vec!["UF:".into(), "DF".into()],
            vec!["ESTACAO:".into(), "BRASILIA".into()],
            vec!["CODIGO (WMO):".into(), "A001".into()],
            vec!["LATITUDE:".into(), "-15,78961111".into()],
            vec!["LONGITUDE:".into(), "-47,92580555".into()],
            vec!["ALTITUDE:".into(), "1160,96".into()],
            vec!["DATA DE FUNDACAO:".into(), "07/05/00".into()],
        ]
    }

    #[test]
    fn test_identity_from_filename() {
        let extractor = MetadataExtractor::new();
        let identity = extractor
            .extract(
                Path::new("INMET_SE_SP_A701_SAO PAULO_01-01-2024_A_31-12-2024.CSV"),
                &preamble(),
            )
            .unwrap();

        // Filename wins for identity, preamble supplies coordinates
        assert_eq!(identity.region, "SE");
        assert_eq!(identity.uf, "SP");
        assert_eq!(identity.wmo_code, "A701");
        assert_eq!(identity.station_name, "SAO PAULO");
        assert!((identity.latitude - -15.78961111).abs() < 1e-9);
        assert!((identity.altitude_m - 1160.96).abs() < 1e-9);
        assert_eq!(identity.founding_date.as_deref(), Some("07/05/00"));
    }

    #[test]
    fn test_short_filename_falls_back_to_preamble() {
        let extractor = MetadataExtractor::new();
        let identity = extractor
            .extract(Path::new("INMET_export.CSV"), &preamble())
            .unwrap();

        assert_eq!(identity.region, "CO");
        assert_eq!(identity.uf, "DF");
        assert_eq!(identity.wmo_code, "A001");
        assert_eq!(identity.station_name, "BRASILIA");
    }

    #[test]
    fn test_missing_coordinate_is_fatal() {
        let mut lines = preamble();
        lines.retain(|fields| !fields[0].starts_with("LATITUDE"));

        let extractor = MetadataExtractor::new();
        let err = extractor
            .extract(Path::new("INMET_CO_DF_A001_BRASILIA_X_A_Y.CSV"), &lines)
            .unwrap_err();

        assert!(matches!(
            err,
            ProcessingError::CoordinateParseFailure { field: "latitude", .. }
        ));
    }

    #[test]
    fn test_unparsable_altitude_is_fatal() {
        let mut lines = preamble();
        for fields in &mut lines {
            if fields[0].starts_with("ALTITUDE") {
                fields[1] = "n/a".into();
            }
        }

        let extractor = MetadataExtractor::new();
        let err = extractor
            .extract(Path::new("INMET_CO_DF_A001_BRASILIA_X_A_Y.CSV"), &lines)
            .unwrap_err();

        assert!(matches!(
            err,
            ProcessingError::CoordinateParseFailure { field: "altitude", .. }
        ));
    }
}
