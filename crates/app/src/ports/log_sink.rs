//! Logger port — the external single-argument message sink.
//!
//! The surrounding application supplies the sink; the core reports
//! zone-not-found errors, retry notices, and terminal-failure notices to it.
//! No structured fields, no return value.

/// Receives human-readable notices from the scheduling core.
pub trait LogSink: Send + Sync {
    /// Deliver one message to the external logger.
    fn log(&self, message: &str);
}

impl<T: LogSink> LogSink for std::sync::Arc<T> {
    fn log(&self, message: &str) {
        (**self).log(message);
    }
}
