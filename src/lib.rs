//! # ctx_logger
//!
//! A context-aware logging facade with two backends: local appenders and
//! Google Cloud Logging.
//!
//! ## Features
//!
//! - **One facade**: code logs through [`Logger`] / [`CtxLogger`] and never
//!   names a backend
//! - **Level inheritance**: loggers without a level follow their parent
//! - **Trace correlation**: the cloud backend attaches the trace id carried
//!   in a request [`Context`]; an axum middleware fills it from
//!   `X-Cloud-Trace-Context`
//! - **Cheap when disabled**: level checks never format
//!
//! ```
//! use ctx_logger::prelude::*;
//! use ctx_logger::info;
//!
//! let factory = DefaultLoggerFactory::builder()
//!     .level(LogLevel::Info)
//!     .appender(ConsoleAppender::json())
//!     .build();
//!
//! let logger = factory.get_logger("startup");
//! info!(logger, "listening on {}", 8080);
//! ```

pub mod appenders;
pub mod cloud;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, ConsoleTarget};
    pub use crate::cloud::{ClientFailurePolicy, CloudLogger, CloudLoggerFactory};
    pub use crate::core::{
        Appender, Context, CtxLogger, DefaultLogger, DefaultLoggerFactory, FallbackSink,
        FieldValue, LogEntry, LogLevel, Logger, LoggerError, LoggerFactory, OutputFormat, Result,
        Severity, StructuredEntry, CLOUD_TRACE_CONTEXT,
    };
}

pub use appenders::{ConsoleAppender, ConsoleTarget};
pub use cloud::{ClientFailurePolicy, CloudLogger, CloudLoggerFactory};
pub use core::{
    Appender, Context, CtxLogger, DefaultLogger, DefaultLoggerFactory, FallbackSink, FieldValue,
    LevelGate, LogEntry, LogLevel, Logger, LoggerError, LoggerFactory, OutputFormat, Result,
    Severity, StructuredEntry, CLOUD_TRACE_CONTEXT,
};
