use std::path::Path;

use tracing::debug;
use validator::Validate;

use crate::error::Result;
use crate::models::GriddedDataset;
use crate::processors::grid::GridAssembler;
use crate::processors::temporal::TemporalIndexBuilder;
use crate::readers::{MetadataExtractor, RecordTableLoader, StationFileParser};
use crate::utils::sanitize::sanitize_labels;

/// The per-file conversion pipeline: a pure function of one file's bytes
/// and its filename, producing an assembled dataset or a fatal per-file
/// error. Shares no state between invocations.
pub struct FileConverter {
    parser: StationFileParser,
    extractor: MetadataExtractor,
    loader: RecordTableLoader,
    temporal: TemporalIndexBuilder,
    assembler: GridAssembler,
}

impl FileConverter {
    pub fn new() -> Self {
        Self {
            parser: StationFileParser::new(),
            extractor: MetadataExtractor::new(),
            loader: RecordTableLoader::new(),
            temporal: TemporalIndexBuilder::new(),
            assembler: GridAssembler::new(),
        }
    }

    pub fn convert(&self, path: &Path) -> Result<GriddedDataset> {
        let bytes = std::fs::read(path)?;
        self.convert_bytes(&bytes, path)
    }

    pub fn convert_bytes(&self, bytes: &[u8], path: &Path) -> Result<GriddedDataset> {
        let parsed = self.parser.parse_bytes(bytes, path)?;

        let identity = self.extractor.extract(path, &parsed.preamble)?;
        identity.validate()?;

        let table = self.loader.load(&parsed.header, &parsed.records, path)?;
        let index = self.temporal.build(&table);

        debug!(
            "{}: {} rows over {} dates x {} hours",
            path.display(),
            index.rows.len(),
            index.axes.dates.len(),
            index.axes.hours.len()
        );

        let grids = self.assembler.assemble(&table, &index);
        let names = sanitize_labels(grids.iter().map(|(label, _)| label.as_str()));
        let variables = names
            .into_iter()
            .zip(grids)
            .map(|(name, (_, grid))| (name, grid))
            .collect();

        Ok(GriddedDataset::new(identity, index.axes, variables))
    }
}

impl Default for FileConverter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

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
2024/01/01;1200 UTC;31,0;;
2024/01/02;0000 UTC;24,1;70;
2024/01/02;1200 UTC;30,2;55;
invalid;9999;1,0;1;
";

    #[test]
    fn test_end_to_end_single_file() {
        let converter = FileConverter::new();
        let dataset = converter
            .convert_bytes(
                SAMPLE.as_bytes(),
                Path::new("INMET_CO_DF_A001_BRASILIA_01-01-2024_A_31-12-2024.CSV"),
            )
            .unwrap();

        assert_eq!(dataset.identity().region, "CO");
        assert_eq!(dataset.identity().wmo_code, "A001");
        assert_eq!(dataset.axes().shape(), (2, 2));

        let variables = dataset.variables();
        assert_eq!(variables.len(), 2);
        assert_eq!(
            variables[0].0,
            "TEMPERATURA_DO_AR_BULBO_SECO_HORARIA_degC"
        );
        assert_eq!(variables[1].0, "UMIDADE_RELATIVA_DO_AR_HORARIA");

        // One blank humidity cell at (2024/01/01, 12)
        let humidity = &variables[1].1;
        assert_eq!(humidity[[0, 0]], 68.0);
        assert!(humidity[[0, 1]].is_nan());
        assert_eq!(humidity.iter().filter(|v| v.is_nan()).count(), 1);
    }

    #[test]
    fn test_scenario_short_filename_uses_preamble_identity() {
        let converter = FileConverter::new();
        let dataset = converter
            .convert_bytes(SAMPLE.as_bytes(), Path::new("INMET_dump.CSV"))
            .unwrap();

        assert_eq!(dataset.identity().region, "CO");
        assert_eq!(dataset.identity().uf, "DF");
        assert_eq!(dataset.identity().station_name, "BRASILIA");
    }
}
