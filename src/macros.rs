//! Logging macros for ergonomic log message formatting.
//!
//! Each macro checks the level first, so when the level is disabled the
//! format arguments are never evaluated or formatted.
//!
//! # Examples
//!
//! ```
//! use ctx_logger::prelude::*;
//! use ctx_logger::{info, info_ctx};
//!
//! let factory = DefaultLoggerFactory::new();
//! let logger = factory.get_logger("server");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! let ctx = Context::background().with_value(CLOUD_TRACE_CONTEXT, "projects/p/traces/t");
//! info_ctx!(logger, &ctx, "Handled request for {}", "/health");
//! ```

/// Log a message at a runtime level.
///
/// ```
/// # use ctx_logger::prelude::*;
/// # let logger = DefaultLoggerFactory::new().get_logger("app");
/// use ctx_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        #[allow(unused_imports)]
        use $crate::core::Logger as _;
        let logger = &$logger;
        let level = $level;
        if logger.loggable(level) {
            logger.print(level, format_args!($($arg)+));
        }
    }};
}

/// Log a message with a request context at a runtime level.
#[macro_export]
macro_rules! log_ctx {
    ($logger:expr, $ctx:expr, $level:expr, $($arg:tt)+) => {{
        #[allow(unused_imports)]
        use $crate::core::{CtxLogger as _, Logger as _};
        let logger = &$logger;
        let level = $level;
        if logger.loggable(level) {
            logger.print_ctx($ctx, level, format_args!($($arg)+));
        }
    }};
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Error, $($arg)+)
    };
}

/// Log a trace-level message with a request context.
#[macro_export]
macro_rules! trace_ctx {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $crate::log_ctx!($logger, $ctx, $crate::core::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message with a request context.
#[macro_export]
macro_rules! debug_ctx {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $crate::log_ctx!($logger, $ctx, $crate::core::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message with a request context.
#[macro_export]
macro_rules! info_ctx {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $crate::log_ctx!($logger, $ctx, $crate::core::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message with a request context.
#[macro_export]
macro_rules! warn_ctx {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $crate::log_ctx!($logger, $ctx, $crate::core::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message with a request context.
#[macro_export]
macro_rules! error_ctx {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $crate::log_ctx!($logger, $ctx, $crate::core::LogLevel::Error, $($arg)+)
    };
}
