use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::events::{ConversionEvent, EventSink};

pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    silent: bool,
}

impl ProgressReporter {
    pub fn new(total: u64, message: &str, silent: bool) -> Self {
        if silent {
            Self {
                progress_bar: None,
                silent: true,
            }
        } else {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            pb.set_message(message.to_string());
            pb.enable_steady_tick(Duration::from_millis(100));

            Self {
                progress_bar: Some(pb),
                silent: false,
            }
        }
    }

    pub fn new_spinner(message: &str, silent: bool) -> Self {
        if silent {
            Self {
                progress_bar: None,
                silent: true,
            }
        } else {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .unwrap(),
            );
            pb.set_message(message.to_string());
            pb.enable_steady_tick(Duration::from_millis(100));

            Self {
                progress_bar: Some(pb),
                silent: false,
            }
        }
    }

    pub fn set_length(&self, total: u64) {
        if let Some(ref pb) = self.progress_bar {
            pb.set_length(total);
        }
    }

    pub fn update(&self, current: u64) {
        if let Some(ref pb) = self.progress_bar {
            pb.set_position(current);
        }
    }

    pub fn increment(&self, delta: u64) {
        if let Some(ref pb) = self.progress_bar {
            pb.inc(delta);
        }
    }

    pub fn set_message(&self, message: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.set_message(message.to_string());
        }
    }

    pub fn finish_with_message(&self, message: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_with_message(message.to_string());
        }
    }

    pub fn finish(&self) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish();
        }
    }

    pub fn println(&self, message: &str) {
        if !self.silent {
            if let Some(ref pb) = self.progress_bar {
                pb.println(message);
            } else {
                println!("{}", message);
            }
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish();
        }
    }
}

/// Console subscriber for batch conversion events: a progress bar plus a
/// line per skipped/failed file.
pub struct ConsoleSink {
    reporter: ProgressReporter,
}

impl ConsoleSink {
    pub fn new(silent: bool) -> Self {
        Self {
            reporter: ProgressReporter::new(0, "Scanning for station files...", silent),
        }
    }
}

impl EventSink for ConsoleSink {
    fn emit(&self, event: &ConversionEvent) {
        match event {
            ConversionEvent::BatchStarted {
                candidates,
                selected,
            } => {
                self.reporter.set_length(*selected as u64);
                self.reporter.set_message(&format!(
                    "Converting {} of {} station file(s)...",
                    selected, candidates
                ));
            }
            ConversionEvent::FileStarted { input, .. } => {
                if let Some(name) = input.file_name().and_then(|n| n.to_str()) {
                    self.reporter.set_message(&format!("Processing {}", name));
                }
            }
            ConversionEvent::FileConverted { .. } => {
                self.reporter.increment(1);
            }
            ConversionEvent::FileSkipped { output, .. } => {
                self.reporter.increment(1);
                self.reporter
                    .println(&format!("skipped existing {}", output.display()));
            }
            ConversionEvent::FileFailed { input, reason } => {
                self.reporter.increment(1);
                self.reporter
                    .println(&format!("failed {}: {}", input.display(), reason));
            }
            ConversionEvent::BatchFinished {
                converted,
                skipped,
                failed,
            } => {
                self.reporter.finish_with_message(&format!(
                    "Done: {} converted, {} skipped, {} failed",
                    converted, skipped, failed
                ));
            }
        }
    }
}
