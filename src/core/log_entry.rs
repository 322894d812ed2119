//! Log entry handed to local appenders

use super::log_level::LogLevel;
use super::structured_entry::{Severity, StructuredEntry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// Name of the logger that produced the entry
    pub logger: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

impl LogEntry {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// to prevent attackers from injecting fake log entries.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, logger: impl Into<String>, message: String) -> Self {
        Self {
            level,
            message: Self::sanitize_message(&message),
            timestamp: Utc::now(),
            logger: logger.into(),
            component: None,
            trace: None,
        }
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        let component = component.into();
        if !component.is_empty() {
            self.component = Some(component);
        }
        self
    }

    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }

    /// The structured envelope for this entry
    pub fn to_structured(&self) -> StructuredEntry {
        let mut structured = StructuredEntry::new(self.message.clone());
        structured.severity = Severity::from_level(self.level);
        if let Some(component) = &self.component {
            structured.component = component.clone();
        }
        structured.trace = self.trace.clone();
        structured
    }
}
