use std::path::Path;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::Result;
use crate::models::GriddedDataset;
use crate::utils::constants::CREATION_DATE_FORMAT;

/// Axis order shared by every data variable. The non-temporal axes are
/// singletons carrying the station identity.
const AXES: [&str; 8] = [
    "region", "uf", "wmo_code", "date", "hour_utc", "lat", "lon", "alt",
];

pub struct NetcdfWriter;

impl NetcdfWriter {
    pub fn new() -> Self {
        Self
    }

    /// Persist a dataset to a NetCDF file. The artifact is written exactly
    /// once; callers own atomic-publication concerns (temp path + rename).
    pub fn write(&self, dataset: &GriddedDataset, path: &Path) -> Result<()> {
        let mut file = netcdf::create(path)?;

        let identity = dataset.identity();
        let axes = dataset.axes();
        let (n_dates, n_hours) = axes.shape();

        file.add_dimension("region", 1)?;
        file.add_dimension("uf", 1)?;
        file.add_dimension("wmo_code", 1)?;
        file.add_dimension("date", n_dates)?;
        file.add_dimension("hour_utc", n_hours)?;
        file.add_dimension("lat", 1)?;
        file.add_dimension("lon", 1)?;
        file.add_dimension("alt", 1)?;

        {
            let mut var = file.add_variable_with_type(
                "region",
                &["region"],
                &netcdf::types::NcVariableType::String,
            )?;
            var.put_string(&identity.region, [0])?;
        }
        {
            let mut var = file.add_variable_with_type(
                "uf",
                &["uf"],
                &netcdf::types::NcVariableType::String,
            )?;
            var.put_string(&identity.uf, [0])?;
        }
        {
            let mut var = file.add_variable_with_type(
                "wmo_code",
                &["wmo_code"],
                &netcdf::types::NcVariableType::String,
            )?;
            var.put_string(&identity.wmo_code, [0])?;
        }

        {
            // Unix epoch; chrono's NaiveDate::default is 1970-01-01
            let epoch = NaiveDate::default();
            let days: Vec<i32> = axes
                .dates
                .iter()
                .map(|d| d.signed_duration_since(epoch).num_days() as i32)
                .collect();
            let mut var = file.add_variable::<i32>("date", &["date"])?;
            var.put_attribute("long_name", "Date")?;
            var.put_attribute("units", "days since 1970-01-01")?;
            var.put_attribute("calendar", "standard")?;
            var.put_values(&days, ..)?;
        }

        {
            let hours: Vec<i32> = axes.hours.iter().map(|&h| h as i32).collect();
            let mut var = file.add_variable::<i32>("hour_utc", &["hour_utc"])?;
            var.put_attribute("long_name", "Hour in UTC")?;
            var.put_attribute("units", "hours")?;
            var.put_values(&hours, ..)?;
        }

        {
            let mut var = file.add_variable::<f64>("lat", &["lat"])?;
            var.put_attribute("long_name", "Latitude")?;
            var.put_attribute("units", "degrees_north")?;
            var.put_values(&[identity.latitude], ..)?;
        }
        {
            let mut var = file.add_variable::<f64>("lon", &["lon"])?;
            var.put_attribute("long_name", "Longitude")?;
            var.put_attribute("units", "degrees_east")?;
            var.put_values(&[identity.longitude], ..)?;
        }
        {
            let mut var = file.add_variable::<f64>("alt", &["alt"])?;
            var.put_attribute("long_name", "Altitude above sea level")?;
            var.put_attribute("units", "m")?;
            var.put_values(&[identity.altitude_m], ..)?;
        }

        for (name, grid) in dataset.variables() {
            let values: Vec<f64> = grid.iter().copied().collect();
            let mut var = file.add_variable::<f64>(name, &AXES)?;
            var.put_attribute("_FillValue", f64::NAN)?;
            var.put_values(&values, ..)?;
        }

        let provenance = dataset.provenance();
        file.add_attribute("source", provenance.source.as_str())?;
        file.add_attribute("station", identity.station_name.as_str())?;
        file.add_attribute("date_of_foundation", provenance.founding_date.as_str())?;
        file.add_attribute("title", provenance.title.as_str())?;
        file.add_attribute("institution", provenance.institution.as_str())?;
        file.add_attribute("region", identity.region.as_str())?;
        file.add_attribute("uf", identity.uf.as_str())?;
        file.add_attribute("wmo_code", identity.wmo_code.as_str())?;
        file.add_attribute("latitude", identity.latitude)?;
        file.add_attribute("longitude", identity.longitude)?;
        file.add_attribute("altitude_m", identity.altitude_m)?;
        file.add_attribute(
            "creation_date",
            provenance
                .created
                .format(CREATION_DATE_FORMAT)
                .to_string()
                .as_str(),
        )?;
        file.add_attribute("conventions", provenance.conventions.as_str())?;

        debug!(
            "wrote {} ({} variables, {} x {} grid)",
            path.display(),
            dataset.variables().len(),
            n_dates,
            n_hours
        );

        Ok(())
    }
}

impl Default for NetcdfWriter {
    fn default() -> Self {
        Self::new()
    }
}
