//! Logger facade traits
//!
//! Application code depends on [`Logger`] / [`CtxLogger`] and receives
//! concrete loggers from a [`LoggerFactory`] chosen at startup. Every
//! per-level method funnels into a single primitive, [`Logger::print`] or
//! [`CtxLogger::print_ctx`], which applies the level gate before anything is
//! formatted.

use super::context::Context;
use super::level_gate::LevelGate;
use super::log_level::LogLevel;
use std::fmt::Arguments;
use std::sync::Arc;

/// Level-filtered logging interface.
///
/// Messages are passed as [`Arguments`], which defer formatting until an
/// implementation decides to emit. The `*_enabled` checks never format; use
/// them (or the crate's macros, which do it for you) to skip building costly
/// arguments.
pub trait Logger: Send + Sync {
    /// Logger name, used for routing and grouping.
    fn name(&self) -> &str;

    /// Level gate backing this logger.
    fn gate(&self) -> &LevelGate;

    /// Emit `args` at `level` if the level is enabled.
    fn print(&self, level: LogLevel, args: Arguments<'_>);

    /// Effective level, inherited from the parent when unset.
    fn level(&self) -> LogLevel {
        self.gate().effective_level()
    }

    fn set_level(&self, level: LogLevel) {
        self.gate().set_level(level);
    }

    fn loggable(&self, level: LogLevel) -> bool {
        self.gate().loggable(level)
    }

    fn trace(&self, args: Arguments<'_>) {
        self.print(LogLevel::Trace, args);
    }

    fn trace_enabled(&self) -> bool {
        self.loggable(LogLevel::Trace)
    }

    fn debug(&self, args: Arguments<'_>) {
        self.print(LogLevel::Debug, args);
    }

    fn debug_enabled(&self) -> bool {
        self.loggable(LogLevel::Debug)
    }

    fn info(&self, args: Arguments<'_>) {
        self.print(LogLevel::Info, args);
    }

    fn info_enabled(&self) -> bool {
        self.loggable(LogLevel::Info)
    }

    fn warn(&self, args: Arguments<'_>) {
        self.print(LogLevel::Warn, args);
    }

    fn warn_enabled(&self) -> bool {
        self.loggable(LogLevel::Warn)
    }

    fn error(&self, args: Arguments<'_>) {
        self.print(LogLevel::Error, args);
    }

    fn error_enabled(&self) -> bool {
        self.loggable(LogLevel::Error)
    }
}

/// Logger whose calls can carry a request-scoped [`Context`].
///
/// Implementations read whatever correlation data they understand from the
/// context (the cloud transport reads the trace token) and ignore the rest.
pub trait CtxLogger: Logger {
    fn print_ctx(&self, ctx: &Context, level: LogLevel, args: Arguments<'_>);

    fn trace_ctx(&self, ctx: &Context, args: Arguments<'_>) {
        self.print_ctx(ctx, LogLevel::Trace, args);
    }

    fn debug_ctx(&self, ctx: &Context, args: Arguments<'_>) {
        self.print_ctx(ctx, LogLevel::Debug, args);
    }

    fn info_ctx(&self, ctx: &Context, args: Arguments<'_>) {
        self.print_ctx(ctx, LogLevel::Info, args);
    }

    fn warn_ctx(&self, ctx: &Context, args: Arguments<'_>) {
        self.print_ctx(ctx, LogLevel::Warn, args);
    }

    fn error_ctx(&self, ctx: &Context, args: Arguments<'_>) {
        self.print_ctx(ctx, LogLevel::Error, args);
    }
}

/// Produces named loggers bound to one transport.
///
/// Construction never fails; transport problems surface on first use.
/// Repeated calls with the same name may return distinct instances.
pub trait LoggerFactory: Send + Sync {
    fn get_logger(&self, name: &str) -> Arc<dyn CtxLogger>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    struct Recording {
        gate: LevelGate,
        seen: Mutex<Vec<(LogLevel, String, Option<String>)>>,
    }

    impl Recording {
        fn at(level: LogLevel) -> Self {
            Self {
                gate: LevelGate::new(level),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl Logger for Recording {
        fn name(&self) -> &str {
            "recording"
        }

        fn gate(&self) -> &LevelGate {
            &self.gate
        }

        fn print(&self, level: LogLevel, args: Arguments<'_>) {
            self.print_ctx(&Context::background(), level, args);
        }
    }

    impl CtxLogger for Recording {
        fn print_ctx(&self, ctx: &Context, level: LogLevel, args: Arguments<'_>) {
            if !self.loggable(level) {
                return;
            }
            self.seen
                .lock()
                .push((level, args.to_string(), ctx.trace().map(String::from)));
        }
    }

    #[test]
    fn test_per_level_methods_delegate_to_print() {
        let logger = Recording::at(LogLevel::Trace);
        logger.trace(format_args!("t"));
        logger.debug(format_args!("d"));
        logger.info(format_args!("i {}", 1));
        logger.warn(format_args!("w"));
        logger.error(format_args!("e"));

        let levels: Vec<_> = logger.seen.lock().iter().map(|s| s.0).collect();
        assert_eq!(levels, LogLevel::EMITTING.to_vec());
        assert_eq!(logger.seen.lock()[2].1, "i 1");
    }

    #[test]
    fn test_enabled_checks_follow_threshold() {
        let logger = Recording::at(LogLevel::Warn);
        assert!(!logger.trace_enabled());
        assert!(!logger.debug_enabled());
        assert!(!logger.info_enabled());
        assert!(logger.warn_enabled());
        assert!(logger.error_enabled());

        logger.info(format_args!("dropped"));
        assert!(logger.seen.lock().is_empty());
    }

    #[test]
    fn test_ctx_methods_pass_context() {
        let logger = Recording::at(LogLevel::Debug);
        let ctx = Context::background()
            .with_value(crate::core::CLOUD_TRACE_CONTEXT, "projects/p/traces/t");

        logger.debug_ctx(&ctx, format_args!("with trace"));
        logger.info_ctx(&Context::background(), format_args!("without trace"));

        let seen = logger.seen.lock();
        assert_eq!(seen[0].2.as_deref(), Some("projects/p/traces/t"));
        assert_eq!(seen[1].2, None);
    }

    #[test]
    fn test_set_level_through_facade() {
        let logger = Recording::at(LogLevel::Error);
        assert_eq!(logger.level(), LogLevel::Error);

        logger.set_level(LogLevel::Debug);
        assert!(logger.debug_enabled());
    }
}
