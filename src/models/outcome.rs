use std::path::PathBuf;

use serde::Serialize;

use crate::error::{ProcessingError, Result};

/// What happened to one selected input file.
#[derive(Debug, Clone)]
pub enum ConversionOutcome {
    Converted { input: PathBuf, output: PathBuf },
    Skipped { input: PathBuf, output: PathBuf },
    Failed { input: PathBuf, reason: String },
}

/// Aggregate result of one batch invocation.
///
/// Constructed through [`BatchResult::failure`] or
/// [`BatchResult::from_outcomes`] so the count/list invariants hold at the
/// boundary.
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub folder_path: String,
    pub success: bool,
    pub message: String,
    pub converted_files: usize,
    pub skipped_files: usize,
    pub total_files_found: usize,
    pub saved_paths: Vec<String>,
    pub failed_files: Vec<String>,
}

impl BatchResult {
    /// A batch that never got to per-file processing (missing directory,
    /// no candidates, empty post-filter selection).
    pub fn failure(folder_path: &str, message: String, total_files_found: usize) -> Self {
        Self {
            folder_path: folder_path.to_string(),
            success: false,
            message,
            converted_files: 0,
            skipped_files: 0,
            total_files_found,
            saved_paths: Vec::new(),
            failed_files: Vec::new(),
        }
    }

    /// Aggregate per-file outcomes. Success means at least one file was
    /// converted or skipped.
    pub fn from_outcomes(
        folder_path: &str,
        total_files_found: usize,
        outcomes: &[ConversionOutcome],
    ) -> Result<Self> {
        let mut converted_files = 0;
        let mut skipped_files = 0;
        let mut saved_paths = Vec::new();
        let mut failed_files = Vec::new();

        for outcome in outcomes {
            match outcome {
                ConversionOutcome::Converted { output, .. } => {
                    converted_files += 1;
                    saved_paths.push(output.display().to_string());
                }
                ConversionOutcome::Skipped { output, .. } => {
                    skipped_files += 1;
                    saved_paths.push(output.display().to_string());
                }
                ConversionOutcome::Failed { input, .. } => {
                    failed_files.push(
                        input
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_else(|| input.display().to_string()),
                    );
                }
            }
        }

        let success = converted_files + skipped_files > 0;
        let message = if success {
            let mut message = format!("Processing complete: {} converted", converted_files);
            if skipped_files > 0 {
                message.push_str(&format!(", {} skipped (already existed)", skipped_files));
            }
            if !failed_files.is_empty() {
                message.push_str(&format!(", {} failed", failed_files.len()));
            }
            message
        } else {
            format!("No files were processed. {} failed", failed_files.len())
        };

        let result = Self {
            folder_path: folder_path.to_string(),
            success,
            message,
            converted_files,
            skipped_files,
            total_files_found,
            saved_paths,
            failed_files,
        };
        result.check_invariants()?;

        Ok(result)
    }

    fn check_invariants(&self) -> Result<()> {
        if self.saved_paths.len() != self.converted_files + self.skipped_files {
            return Err(ProcessingError::InvalidFormat(format!(
                "batch result has {} saved paths for {} converted + {} skipped files",
                self.saved_paths.len(),
                self.converted_files,
                self.skipped_files
            )));
        }
        Ok(())
    }
}
