use std::path::PathBuf;

/// Progress events emitted by the batch orchestrator. Presentation is a
/// subscriber concern; the core never prints.
#[derive(Debug, Clone)]
pub enum ConversionEvent {
    BatchStarted {
        candidates: usize,
        selected: usize,
    },
    FileStarted {
        input: PathBuf,
        index: usize,
        total: usize,
    },
    FileConverted {
        input: PathBuf,
        output: PathBuf,
    },
    FileSkipped {
        input: PathBuf,
        output: PathBuf,
    },
    FileFailed {
        input: PathBuf,
        reason: String,
    },
    BatchFinished {
        converted: usize,
        skipped: usize,
        failed: usize,
    },
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: &ConversionEvent);
}

/// Sink that discards everything; the default when no subscriber is set.
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: &ConversionEvent) {}
}
