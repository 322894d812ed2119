//! Console appender implementation

use crate::core::{Appender, LogEntry, LogLevel, OutputFormat, Result};
#[cfg(feature = "console")]
use colored::Colorize;
use std::io::Write;

/// Which standard stream the console appender writes to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConsoleTarget {
    /// Error to stderr, everything else to stdout
    #[default]
    Auto,
    Stdout,
    Stderr,
}

pub struct ConsoleAppender {
    use_colors: bool,
    output_format: OutputFormat,
    target: ConsoleTarget,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self::with_colors(true)
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            output_format: OutputFormat::default(),
            target: ConsoleTarget::default(),
        }
    }

    /// JSON envelope lines on stdout, uncolored
    ///
    /// # Example
    ///
    /// ```
    /// use ctx_logger::appenders::ConsoleAppender;
    /// use ctx_logger::prelude::*;
    ///
    /// let factory = DefaultLoggerFactory::builder()
    ///     .appender(ConsoleAppender::json())
    ///     .build();
    /// ```
    pub fn json() -> Self {
        Self::with_colors(false)
            .with_output_format(OutputFormat::Json)
            .with_target(ConsoleTarget::Stdout)
    }

    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: ConsoleTarget) -> Self {
        self.target = target;
        self
    }

    fn render(&self, entry: &LogEntry) -> Result<String> {
        match self.output_format {
            OutputFormat::Text if self.use_colors => Ok(self.format_colored(entry)),
            format => format.format(entry),
        }
    }

    #[cfg(feature = "console")]
    fn format_colored(&self, entry: &LogEntry) -> String {
        let level_str = format!("{:5}", entry.level.to_str())
            .color(entry.level.color_code())
            .to_string();
        OutputFormat::format_text(entry, &level_str)
    }

    #[cfg(not(feature = "console"))]
    fn format_colored(&self, entry: &LogEntry) -> String {
        OutputFormat::format_text(entry, entry.level.to_str())
    }

    fn to_stderr(&self, level: LogLevel) -> bool {
        match self.target {
            ConsoleTarget::Auto => level >= LogLevel::Error,
            ConsoleTarget::Stdout => false,
            ConsoleTarget::Stderr => true,
        }
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let output = self.render(entry)?;

        if self.to_stderr(entry.level) {
            writeln!(std::io::stderr().lock(), "{}", output)?;
        } else {
            writeln!(std::io::stdout().lock(), "{}", output)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        // Flush both stdout and stderr since we write to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
