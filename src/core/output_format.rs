//! Output format configuration for log entries
//!
//! - Text: Human-readable format (default)
//! - Json: the structured envelope, one object per line, ready for ingestion
//!   by a logging agent that reads stdout

use super::{error::Result, log_entry::LogEntry};

/// Timestamp layout used by the text format
pub const TEXT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Output format for log entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    ///
    /// Example: `[2025-01-08T10:30:45.123Z] [INFO ] api - Request processed`
    #[default]
    Text,

    /// Structured JSON envelope
    ///
    /// Example: `{"message":"Request processed","severity":"INFO","component":"billing"}`
    Json,
}

impl OutputFormat {
    /// Format a log entry according to this output format
    pub fn format(&self, entry: &LogEntry) -> Result<String> {
        match self {
            OutputFormat::Text => Ok(Self::format_text(entry, entry.level.to_str())),
            OutputFormat::Json => Ok(entry.to_structured().to_json()?),
        }
    }

    /// Format as text with a caller-supplied level label
    pub(crate) fn format_text(entry: &LogEntry, level_label: &str) -> String {
        let mut line = format!(
            "[{}] [{:5}] {}",
            entry.timestamp.format(TEXT_TIMESTAMP_FORMAT),
            level_label,
            entry.logger
        );

        if let Some(component) = &entry.component {
            line.push_str(&format!(" ({})", component));
        }
        line.push_str(" - ");
        line.push_str(&entry.message);

        if let Some(trace) = &entry.trace {
            line.push_str(&format!(" trace={}", trace));
        }

        line
    }
}
