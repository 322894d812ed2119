//! Transport seam between `CloudLogger` and the hosted logging service

use crate::core::{LoggerError, Result, Severity, StructuredEntry};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One record handed to a log client
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    pub severity: Severity,
    pub payload: StructuredEntry,
    /// Trace resource name, `projects/<project>/traces/<id>`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl LogRecord {
    pub fn new(severity: Severity, payload: StructuredEntry) -> Self {
        Self {
            severity,
            payload,
            trace: None,
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }
}

/// A client bound to one project. Dropping it releases the connection.
pub trait LogClient: Send {
    /// Write `record` to the log stream `log_name`.
    fn log(&mut self, log_name: &str, record: LogRecord) -> Result<()>;
}

/// Creates clients on demand, one per emitted record.
pub trait ClientConnector: Send + Sync {
    fn connect(&self, project_id: &str) -> Result<Box<dyn LogClient>>;
}

/// Connector used when no transport is available; every connect fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct MissingConnector;

impl ClientConnector for MissingConnector {
    fn connect(&self, project_id: &str) -> Result<Box<dyn LogClient>> {
        Err(LoggerError::transport(project_id, "no log client connector configured"))
    }
}
