use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{ProcessingError, Result};
use crate::events::{ConversionEvent, EventSink, NullSink};
use crate::models::{BatchResult, ConversionOutcome};
use crate::processors::pipeline::FileConverter;
use crate::utils::filename::{
    is_station_file, output_dir_for, output_path_for, parse_station_filename,
};
use crate::writers::NetcdfWriter;

/// Registry of per-output-path locks. The existence check and the write of
/// one artifact form a single critical section, so two workers can never
/// both decide "does not exist, proceed to write" for the same path.
struct PathLocks {
    locks: Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl PathLocks {
    fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    fn lock_for(&self, path: &Path) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks
            .entry(path.to_path_buf())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// Batch conversion orchestrator: discovers station files in a directory,
/// applies the region/UF/WMO filters, honors the skip-existing policy, and
/// runs the per-file pipeline across a worker pool. Per-file failures are
/// recorded, never propagated; batch-level conditions (missing directory,
/// no candidates, empty selection) produce a failed [`BatchResult`] rather
/// than an error.
pub struct BatchConverter {
    region: Option<Vec<String>>,
    uf: Option<Vec<String>>,
    wmo_code: Option<Vec<String>>,
    all_files: bool,
    skip_existing: bool,
    max_workers: usize,
    sink: Arc<dyn EventSink>,
}

impl BatchConverter {
    pub fn new() -> Self {
        Self {
            region: None,
            uf: None,
            wmo_code: None,
            all_files: false,
            skip_existing: true,
            max_workers: num_cpus::get(),
            sink: Arc::new(NullSink),
        }
    }

    pub fn with_region_filter(mut self, values: Vec<String>) -> Self {
        self.region = normalize_filter(values);
        self
    }

    pub fn with_uf_filter(mut self, values: Vec<String>) -> Self {
        self.uf = normalize_filter(values);
        self
    }

    pub fn with_wmo_filter(mut self, values: Vec<String>) -> Self {
        self.wmo_code = normalize_filter(values);
        self
    }

    /// Convert every candidate, ignoring the filters.
    pub fn with_all_files(mut self, all_files: bool) -> Self {
        self.all_files = all_files;
        self
    }

    /// Skip files whose output artifact already exists (the default).
    pub fn with_skip_existing(mut self, skip_existing: bool) -> Self {
        self.skip_existing = skip_existing;
        self
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers.max(1);
        self
    }

    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Run the batch over a directory of station exports.
    ///
    /// Returns `Err` only for contract violations (e.g. the worker pool
    /// cannot be built); every data-quality condition lands in the returned
    /// [`BatchResult`].
    pub fn convert(&self, csv_folder: &Path) -> Result<BatchResult> {
        let folder_display = csv_folder.display().to_string();

        if !csv_folder.is_dir() {
            return Ok(BatchResult::failure(
                &folder_display,
                format!("input folder {} not found", folder_display),
                0,
            ));
        }

        let candidates = self.discover_candidates(csv_folder)?;
        if candidates.is_empty() {
            return Ok(BatchResult::failure(
                &folder_display,
                "no INMET station files found".to_string(),
                0,
            ));
        }
        info!("found {} station file(s) in {}", candidates.len(), folder_display);

        let selected = self.select(&candidates);
        if selected.is_empty() {
            return Ok(BatchResult::failure(
                &folder_display,
                format!(
                    "no files matched the active filters: {}",
                    self.describe_filters()
                ),
                candidates.len(),
            ));
        }

        let output_dir = output_dir_for(csv_folder);
        if let Err(e) = std::fs::create_dir_all(&output_dir) {
            return Ok(BatchResult::failure(
                &folder_display,
                format!("could not create output folder {}: {}", output_dir.display(), e),
                candidates.len(),
            ));
        }

        self.sink.emit(&ConversionEvent::BatchStarted {
            candidates: candidates.len(),
            selected: selected.len(),
        });

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .build()
            .map_err(|e| ProcessingError::Config(e.to_string()))?;

        let locks = PathLocks::new();
        let started = AtomicUsize::new(0);
        let total = selected.len();

        let outcomes: Vec<ConversionOutcome> = pool.install(|| {
            selected
                .par_iter()
                .map(|input| {
                    let index = started.fetch_add(1, Ordering::Relaxed) + 1;
                    self.sink.emit(&ConversionEvent::FileStarted {
                        input: input.clone(),
                        index,
                        total,
                    });

                    let outcome = self.convert_one(input, &output_dir, &locks);
                    self.emit_outcome(&outcome);
                    outcome
                })
                .collect()
        });

        let converted = outcomes
            .iter()
            .filter(|o| matches!(o, ConversionOutcome::Converted { .. }))
            .count();
        let skipped = outcomes
            .iter()
            .filter(|o| matches!(o, ConversionOutcome::Skipped { .. }))
            .count();
        self.sink.emit(&ConversionEvent::BatchFinished {
            converted,
            skipped,
            failed: outcomes.len() - converted - skipped,
        });

        BatchResult::from_outcomes(
            &output_dir.display().to_string(),
            candidates.len(),
            &outcomes,
        )
    }

    /// Enumerate candidate files, sorted by name so runs are deterministic.
    fn discover_candidates(&self, csv_folder: &Path) -> Result<Vec<PathBuf>> {
        let mut candidates = Vec::new();
        for entry in std::fs::read_dir(csv_folder)? {
            let path = entry?.path();
            if path.is_file() && is_station_file(&path) {
                candidates.push(path);
            }
        }
        candidates.sort();
        Ok(candidates)
    }

    /// Apply the filename-derived filters: AND across fields, OR within a
    /// multi-value filter, matched case-insensitively. Files whose names
    /// lack the identity segments never match (but still count as found).
    fn select(&self, candidates: &[PathBuf]) -> Vec<PathBuf> {
        if self.all_files {
            return candidates.to_vec();
        }

        candidates
            .iter()
            .filter(|path| match parse_station_filename(path) {
                Ok(parsed) => {
                    matches_filter(&self.region, &parsed.region)
                        && matches_filter(&self.uf, &parsed.uf)
                        && matches_filter(&self.wmo_code, &parsed.wmo_code)
                }
                Err(_) => {
                    debug!("skipping {}: unrecognized name pattern", path.display());
                    false
                }
            })
            .cloned()
            .collect()
    }

    /// Convert one file in isolation. The existence check and the artifact
    /// write happen under the output path's lock; the artifact is written to
    /// a temporary sibling and renamed into place.
    fn convert_one(&self, input: &Path, output_dir: &Path, locks: &PathLocks) -> ConversionOutcome {
        let output = output_path_for(input, output_dir);

        let lock = locks.lock_for(&output);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());

        if self.skip_existing && output.exists() {
            debug!("skipping existing artifact {}", output.display());
            return ConversionOutcome::Skipped {
                input: input.to_path_buf(),
                output,
            };
        }

        match self.run_pipeline(input, &output) {
            Ok(()) => ConversionOutcome::Converted {
                input: input.to_path_buf(),
                output,
            },
            Err(e) => {
                warn!("failed to convert {}: {}", input.display(), e);
                ConversionOutcome::Failed {
                    input: input.to_path_buf(),
                    reason: e.to_string(),
                }
            }
        }
    }

    fn run_pipeline(&self, input: &Path, output: &Path) -> Result<()> {
        let converter = FileConverter::new();
        let dataset = converter.convert(input)?;

        let tmp = temp_sibling(output);
        let writer = NetcdfWriter::new();
        if let Err(e) = writer.write(&dataset, &tmp) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e);
        }
        std::fs::rename(&tmp, output)?;

        Ok(())
    }

    fn emit_outcome(&self, outcome: &ConversionOutcome) {
        let event = match outcome {
            ConversionOutcome::Converted { input, output } => ConversionEvent::FileConverted {
                input: input.clone(),
                output: output.clone(),
            },
            ConversionOutcome::Skipped { input, output } => ConversionEvent::FileSkipped {
                input: input.clone(),
                output: output.clone(),
            },
            ConversionOutcome::Failed { input, reason } => ConversionEvent::FileFailed {
                input: input.clone(),
                reason: reason.clone(),
            },
        };
        self.sink.emit(&event);
    }

    fn describe_filters(&self) -> String {
        let mut parts = Vec::new();
        if let Some(values) = &self.region {
            parts.push(format!("region={:?}", values));
        }
        if let Some(values) = &self.uf {
            parts.push(format!("uf={:?}", values));
        }
        if let Some(values) = &self.wmo_code {
            parts.push(format!("wmo_code={:?}", values));
        }
        if parts.is_empty() {
            "none".to_string()
        } else {
            parts.join(", ")
        }
    }
}

impl Default for BatchConverter {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_filter(values: Vec<String>) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values.into_iter().map(|v| v.to_uppercase()).collect())
    }
}

fn matches_filter(filter: &Option<Vec<String>>, value: &str) -> bool {
    match filter {
        Some(values) => values.iter().any(|v| v == value),
        None => true,
    }
}

fn temp_sibling(output: &Path) -> PathBuf {
    let mut name = output
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    output.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_filter() {
        assert_eq!(normalize_filter(vec![]), None);
        assert_eq!(
            normalize_filter(vec!["df".to_string(), "Sp".to_string()]),
            Some(vec!["DF".to_string(), "SP".to_string()])
        );
    }

    #[test]
    fn test_matches_filter() {
        let filter = Some(vec!["DF".to_string(), "SP".to_string()]);
        assert!(matches_filter(&filter, "DF"));
        assert!(matches_filter(&filter, "SP"));
        assert!(!matches_filter(&filter, "MG"));
        assert!(matches_filter(&None, "MG"));
    }

    #[test]
    fn test_temp_sibling() {
        assert_eq!(
            temp_sibling(Path::new("/out/file.nc")),
            Path::new("/out/file.nc.tmp")
        );
    }

    #[test]
    fn test_describe_filters() {
        let converter = BatchConverter::new()
            .with_uf_filter(vec!["df".to_string()])
            .with_region_filter(vec!["co".to_string()]);
        let described = converter.describe_filters();
        assert!(described.contains("region"));
        assert!(described.contains("CO"));
        assert!(described.contains("DF"));

        assert_eq!(BatchConverter::new().describe_filters(), "none");
    }
}
