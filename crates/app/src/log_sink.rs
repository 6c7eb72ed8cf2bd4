//! Tracing-backed log sink for production wiring.

use crate::ports::LogSink;

/// [`LogSink`] that forwards every notice to the `tracing` ecosystem at
/// `INFO` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn log(&self, message: &str) {
        tracing::info!("{message}");
    }
}
