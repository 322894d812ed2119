//! Local sink for the logger's own failures
//!
//! Transports cannot report their errors through themselves, so each factory
//! is handed a `FallbackSink` at construction. Build one at process start and
//! share it; nothing here touches global state.

use super::{appender::Appender, log_entry::LogEntry, log_level::LogLevel};
use crate::appenders::{ConsoleAppender, ConsoleTarget};
use parking_lot::Mutex;
use std::sync::Arc;

/// Logger name stamped on fallback entries
pub const FALLBACK_LOGGER_NAME: &str = "ctx_logger";

pub struct FallbackSink {
    appender: Mutex<Box<dyn Appender>>,
}

impl FallbackSink {
    pub fn new(appender: Box<dyn Appender>) -> Self {
        Self {
            appender: Mutex::new(appender),
        }
    }

    /// Plain, uncolored text on stderr.
    pub fn stderr() -> Self {
        Self::new(Box::new(
            ConsoleAppender::with_colors(false).with_target(ConsoleTarget::Stderr),
        ))
    }

    /// Shared handle to [`FallbackSink::stderr`].
    pub fn shared_stderr() -> Arc<Self> {
        Arc::new(Self::stderr())
    }

    /// Write a diagnostic. Failures of the fallback appender itself are
    /// printed to stderr and otherwise ignored.
    pub fn report(&self, level: LogLevel, message: impl Into<String>) {
        let entry = LogEntry::new(level, FALLBACK_LOGGER_NAME, message.into());
        let mut appender = self.appender.lock();
        let result = appender.append(&entry).and_then(|()| appender.flush());
        if let Err(e) = result {
            eprintln!(
                "[LOGGER ERROR] Fallback appender '{}' failed: {}",
                appender.name(),
                e
            );
        }
    }
}

impl Default for FallbackSink {
    fn default() -> Self {
        Self::stderr()
    }
}

impl std::fmt::Debug for FallbackSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackSink")
            .field("appender", &self.appender.lock().name())
            .finish()
    }
}
