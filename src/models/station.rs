use serde::{Deserialize, Serialize};
use validator::Validate;

/// Identity of a single weather station, as recovered from the filename
/// or the file's metadata preamble. Region, UF and WMO codes are held
/// uppercase.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StationIdentity {
    pub region: String,

    pub uf: String,

    pub wmo_code: String,

    #[validate(length(min = 1))]
    pub station_name: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    pub altitude_m: f64,

    /// Founding date as declared in the preamble, when present. Kept as
    /// free-form text; it only ever travels into provenance attributes.
    pub founding_date: Option<String>,
}

impl StationIdentity {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        region: String,
        uf: String,
        wmo_code: String,
        station_name: String,
        latitude: f64,
        longitude: f64,
        altitude_m: f64,
        founding_date: Option<String>,
    ) -> Self {
        Self {
            region: region.to_uppercase(),
            uf: uf.to_uppercase(),
            wmo_code: wmo_code.to_uppercase(),
            station_name,
            latitude,
            longitude,
            altitude_m,
            founding_date,
        }
    }
}
