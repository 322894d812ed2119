//! Core logger types and traits

pub mod appender;
pub mod context;
pub mod default_logger;
pub mod error;
pub mod fallback;
pub mod level_gate;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod output_format;
pub mod structured_entry;

pub use appender::Appender;
pub use context::{Context, FieldValue, CLOUD_TRACE_CONTEXT};
pub use default_logger::{DefaultLogger, DefaultLoggerFactory, DefaultLoggerFactoryBuilder};
pub use error::{LoggerError, Result};
pub use fallback::FallbackSink;
pub use level_gate::LevelGate;
pub use log_entry::LogEntry;
pub use log_level::{AtomicLevel, LogLevel};
pub use logger::{CtxLogger, Logger, LoggerFactory};
pub use output_format::OutputFormat;
pub use structured_entry::{Severity, StructuredEntry};
