//! Default logger backed by local appenders

use super::{
    appender::Appender,
    context::Context,
    error::Result,
    fallback::FallbackSink,
    level_gate::LevelGate,
    log_entry::LogEntry,
    log_level::LogLevel,
    logger::{CtxLogger, Logger, LoggerFactory},
};
use crate::appenders::ConsoleAppender;
use parking_lot::RwLock;
use std::fmt::Arguments;
use std::sync::Arc;

type SharedAppenders = Arc<RwLock<Vec<Box<dyn Appender>>>>;

/// Logger that writes synchronously to a set of local appenders.
///
/// Children created with [`DefaultLogger::child`] share their parent's
/// appenders and inherit its level until given one of their own. The context
/// of `*_ctx` calls contributes its trace token to the entry and is otherwise
/// ignored.
pub struct DefaultLogger {
    name: String,
    component: String,
    gate: Arc<LevelGate>,
    appenders: SharedAppenders,
    fallback: Arc<FallbackSink>,
}

impl DefaultLogger {
    /// Root logger with no appenders and no level. Until [`Logger::set_level`]
    /// is called it resolves to `Off`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            component: String::new(),
            gate: Arc::new(LevelGate::default()),
            appenders: Arc::new(RwLock::new(Vec::new())),
            fallback: FallbackSink::shared_stderr(),
        }
    }

    /// Logger named `name` inheriting level, appenders and component from `parent`.
    pub fn child(parent: &DefaultLogger, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            component: parent.component.clone(),
            gate: Arc::new(LevelGate::child_of(Arc::clone(&parent.gate))),
            appenders: Arc::clone(&parent.appenders),
            fallback: Arc::clone(&parent.fallback),
        }
    }

    #[must_use]
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = component.into();
        self
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: Arc<FallbackSink>) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    /// Add an appender. It is shared with every child of this logger.
    pub fn add_appender(&self, appender: Box<dyn Appender>) {
        self.appenders.write().push(appender);
    }

    pub fn flush(&self) -> Result<()> {
        let mut appenders = self.appenders.write();
        for appender in appenders.iter_mut() {
            appender.flush()?;
        }
        Ok(())
    }

    /// Write one entry to every appender.
    ///
    /// Each appender is isolated: an error or panic in one is reported to
    /// the fallback sink and the remaining appenders still receive the entry.
    fn dispatch(&self, entry: &LogEntry) {
        let mut appenders = self.appenders.write();

        for appender in appenders.iter_mut() {
            let append_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.append(entry)
            }));

            match append_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    self.fallback.report(
                        LogLevel::Error,
                        format!("Appender '{}' failed: {}", appender.name(), e),
                    );
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    self.fallback.report(
                        LogLevel::Error,
                        format!(
                            "Appender '{}' panicked: {}. Other appenders continue to function.",
                            appender.name(),
                            panic_msg
                        ),
                    );
                }
            }
        }
    }
}

impl Logger for DefaultLogger {
    fn name(&self) -> &str {
        &self.name
    }

    fn gate(&self) -> &LevelGate {
        &self.gate
    }

    fn print(&self, level: LogLevel, args: Arguments<'_>) {
        self.print_ctx(&Context::background(), level, args);
    }
}

impl CtxLogger for DefaultLogger {
    fn print_ctx(&self, ctx: &Context, level: LogLevel, args: Arguments<'_>) {
        if !self.loggable(level) {
            return;
        }

        let mut entry =
            LogEntry::new(level, self.name.as_str(), args.to_string()).with_component(&self.component);
        if let Some(trace) = ctx.trace() {
            entry = entry.with_trace(trace);
        }
        self.dispatch(&entry);
    }
}

impl std::fmt::Debug for DefaultLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultLogger")
            .field("name", &self.name)
            .field("component", &self.component)
            .field("level", &self.gate.effective_level())
            .finish()
    }
}

/// Factory handing out children of one root [`DefaultLogger`].
///
/// Changing the root level through [`DefaultLoggerFactory::set_level`]
/// affects every logger that has not set its own.
pub struct DefaultLoggerFactory {
    root: DefaultLogger,
}

impl DefaultLoggerFactory {
    /// Console output at `Info`.
    pub fn new() -> Self {
        Self::builder().appender(ConsoleAppender::new()).build()
    }

    #[must_use]
    pub fn builder() -> DefaultLoggerFactoryBuilder {
        DefaultLoggerFactoryBuilder::new()
    }

    pub fn root(&self) -> &DefaultLogger {
        &self.root
    }

    pub fn set_level(&self, level: LogLevel) {
        self.root.set_level(level);
    }

    pub fn flush(&self) -> Result<()> {
        self.root.flush()
    }
}

impl Default for DefaultLoggerFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerFactory for DefaultLoggerFactory {
    fn get_logger(&self, name: &str) -> Arc<dyn CtxLogger> {
        Arc::new(DefaultLogger::child(&self.root, name))
    }
}

/// Builder for [`DefaultLoggerFactory`]
///
/// # Example
/// ```
/// use ctx_logger::prelude::*;
///
/// let factory = DefaultLoggerFactory::builder()
///     .level(LogLevel::Debug)
///     .component("billing")
///     .appender(ConsoleAppender::with_colors(false))
///     .build();
///
/// let logger = factory.get_logger("invoices");
/// assert!(logger.debug_enabled());
/// ```
pub struct DefaultLoggerFactoryBuilder {
    level: LogLevel,
    component: String,
    appenders: Vec<Box<dyn Appender>>,
    fallback: Option<Arc<FallbackSink>>,
}

impl DefaultLoggerFactoryBuilder {
    pub fn new() -> Self {
        Self {
            level: LogLevel::Info,
            component: String::new(),
            appenders: Vec::new(),
            fallback: None,
        }
    }

    /// Root threshold
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Component label stamped on every entry
    #[must_use = "builder methods return a new value"]
    pub fn component(mut self, component: impl Into<String>) -> Self {
        self.component = component.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    /// Sink for appender failures. Defaults to stderr.
    #[must_use = "builder methods return a new value"]
    pub fn fallback(mut self, fallback: Arc<FallbackSink>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn build(self) -> DefaultLoggerFactory {
        let mut root = DefaultLogger::new("root").with_component(self.component);
        if let Some(fallback) = self.fallback {
            root = root.with_fallback(fallback);
        }
        root.set_level(self.level);
        for appender in self.appenders {
            root.add_appender(appender);
        }

        DefaultLoggerFactory { root }
    }
}

impl Default for DefaultLoggerFactoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LoggerError, CLOUD_TRACE_CONTEXT};
    use parking_lot::Mutex;

    #[derive(Clone, Default)]
    struct Recording(Arc<Mutex<Vec<LogEntry>>>);

    impl Appender for Recording {
        fn append(&mut self, entry: &LogEntry) -> Result<()> {
            self.0.lock().push(entry.clone());
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    struct Failing;

    impl Appender for Failing {
        fn append(&mut self, _entry: &LogEntry) -> Result<()> {
            Err(LoggerError::IoError(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk full",
            )))
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct Panicking;

    impl Appender for Panicking {
        fn append(&mut self, _entry: &LogEntry) -> Result<()> {
            panic!("appender exploded");
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "panicking"
        }
    }

    #[test]
    fn test_new_root_is_off() {
        let logger = DefaultLogger::new("app");
        assert_eq!(logger.level(), LogLevel::Off);
        assert!(!logger.error_enabled());
    }

    #[test]
    fn test_child_inherits_level_and_appenders() {
        let recording = Recording::default();
        let root = DefaultLogger::new("root");
        root.set_level(LogLevel::Warn);
        root.add_appender(Box::new(recording.clone()));

        let child = DefaultLogger::child(&root, "child");
        assert_eq!(child.level(), LogLevel::Warn);

        child.info(format_args!("filtered"));
        child.warn(format_args!("kept {}", 1));

        let seen = recording.0.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].logger, "child");
        assert_eq!(seen[0].message, "kept 1");
    }

    #[test]
    fn test_ctx_trace_recorded() {
        let recording = Recording::default();
        let factory = DefaultLoggerFactory::builder()
            .level(LogLevel::Trace)
            .component("api")
            .appender(recording.clone())
            .build();
        let logger = factory.get_logger("handler");

        let ctx = Context::background().with_value(CLOUD_TRACE_CONTEXT, "projects/p/traces/t1");
        logger.info_ctx(&ctx, format_args!("served"));

        let seen = recording.0.lock();
        assert_eq!(seen[0].trace.as_deref(), Some("projects/p/traces/t1"));
        assert_eq!(seen[0].component.as_deref(), Some("api"));
    }

    #[test]
    fn test_factory_level_change_reaches_children() {
        let factory = DefaultLoggerFactory::builder().level(LogLevel::Error).build();
        let logger = factory.get_logger("svc");
        assert!(!logger.info_enabled());

        factory.set_level(LogLevel::Info);
        assert!(logger.info_enabled());
    }

    #[test]
    fn test_failing_appender_does_not_block_others() {
        let recording = Recording::default();
        let fallback_seen = Recording::default();
        let factory = DefaultLoggerFactory::builder()
            .appender(Failing)
            .appender(Panicking)
            .appender(recording.clone())
            .fallback(Arc::new(FallbackSink::new(Box::new(fallback_seen.clone()))))
            .build();

        factory.get_logger("svc").error(format_args!("still delivered"));

        assert_eq!(recording.0.lock().len(), 1);
        let reports = fallback_seen.0.lock();
        assert_eq!(reports.len(), 2);
        assert!(reports[0].message.contains("disk full"));
        assert!(reports[1].message.contains("appender exploded"));
    }
}
