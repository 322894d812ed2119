//! Structured JSON envelope understood by Google Cloud Logging

use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity vocabulary of the hosted logging service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Default,
    Debug,
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Map an emitting level to a severity. `Off` and `Uninitialized` have none.
    pub fn from_level(level: LogLevel) -> Option<Self> {
        match level {
            LogLevel::Trace => Some(Severity::Default),
            LogLevel::Debug => Some(Severity::Debug),
            LogLevel::Info => Some(Severity::Info),
            LogLevel::Warn => Some(Severity::Warning),
            LogLevel::Error => Some(Severity::Error),
            LogLevel::Off | LogLevel::Uninitialized => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Default => "DEFAULT",
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One log line in the shape the logging service parses as `jsonPayload`.
///
/// The log viewer allows filtering on `jsonPayload.component`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredEntry {
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub component: String,

    /// Trace resource name, recognised by the agent that ingests JSON lines
    /// from stdout. The API transport sends the trace on the record instead.
    #[serde(
        rename = "logging.googleapis.com/trace",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub trace: Option<String>,
}

impl StructuredEntry {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: None,
            component: String::new(),
            trace: None,
        }
    }

    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    #[must_use]
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = component.into();
        self
    }

    #[must_use]
    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }

    /// Render as a single JSON line. An unset severity is written as `INFO`.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        if self.severity.is_some() {
            serde_json::to_string(self)
        } else {
            let mut filled = self.clone();
            filled.severity = Some(Severity::Info);
            serde_json::to_string(&filled)
        }
    }
}
