use std::sync::{Arc, Mutex};

use crate::AppError;

/// Where the repositories report store failures they have swallowed.
///
/// The store layer never surfaces an error to its callers; it records the
/// failure here and returns an empty or negative result instead. Injecting
/// the sink keeps that side effect observable in tests.
pub trait DiagnosticsSink: Send + Sync {
    fn record(&self, context: &str, error: &AppError);
}

/// Default sink: forwards to the tracing subscriber.
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn record(&self, context: &str, error: &AppError) {
        tracing::error!(
            target: "casefile",
            event = "store_failure",
            context = %context,
            code = %error.code(),
            error = %error
        );
    }
}

/// Convenience constructor for the default sink.
pub fn tracing_sink() -> Arc<dyn DiagnosticsSink> {
    Arc::new(TracingSink)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticEntry {
    pub context: String,
    pub code: String,
    pub message: String,
}

/// Recording sink for tests and health views.
#[derive(Default)]
pub struct MemorySink {
    entries: Mutex<Vec<DiagnosticEntry>>,
}

impl MemorySink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn entries(&self) -> Vec<DiagnosticEntry> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn contexts(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .map(|entry| entry.context)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

impl DiagnosticsSink for MemorySink {
    fn record(&self, context: &str, error: &AppError) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(DiagnosticEntry {
                context: context.to_string(),
                code: error.code().to_string(),
                message: error.message().to_string(),
            });
    }
}
