//! Factory for cloud loggers

use super::client::ClientConnector;
use super::logger::{ClientFailurePolicy, CloudLogger};
#[cfg(feature = "middleware")]
use super::middleware::CloudTraceState;
use crate::core::{CtxLogger, FallbackSink, LevelGate, LogLevel, LoggerFactory};
#[cfg(feature = "http-client")]
use crate::core::{LoggerError, Result};
use std::sync::Arc;

/// Environment variable holding the project id
pub const PROJECT_ENV: &str = "GOOGLE_CLOUD_PROJECT";

/// Environment variable holding an OAuth access token for the REST transport
pub const ACCESS_TOKEN_ENV: &str = "GOOGLE_CLOUD_ACCESS_TOKEN";

/// Hands out [`CloudLogger`]s writing to logs of one project.
///
/// The logger name becomes the log id. All loggers share the factory's root
/// level until they set their own.
pub struct CloudLoggerFactory {
    project_id: String,
    component: String,
    root: Arc<LevelGate>,
    connector: Arc<dyn ClientConnector>,
    fallback: Arc<FallbackSink>,
    on_client_failure: ClientFailurePolicy,
}

impl CloudLoggerFactory {
    /// Builder with the REST transport, logging at `Info`.
    #[must_use]
    pub fn builder(project_id: impl Into<String>) -> CloudLoggerFactoryBuilder {
        CloudLoggerFactoryBuilder::new(project_id)
    }

    /// Builder configured from [`PROJECT_ENV`] and, if set, [`ACCESS_TOKEN_ENV`].
    #[cfg(feature = "http-client")]
    pub fn from_env() -> Result<CloudLoggerFactoryBuilder> {
        let project_id = std::env::var(PROJECT_ENV)
            .ok()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| {
                LoggerError::config("CloudLoggerFactory", format!("{} is not set", PROJECT_ENV))
            })?;

        let mut connector = super::http::HttpConnector::new();
        if let Some(token) = std::env::var(ACCESS_TOKEN_ENV).ok().filter(|t| !t.is_empty()) {
            connector = connector.with_bearer_token(token);
        }

        Ok(Self::builder(project_id).connector(Arc::new(connector)))
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Change the level inherited by every logger from this factory.
    pub fn set_level(&self, level: LogLevel) {
        self.root.set_level(level);
    }

    pub fn level(&self) -> LogLevel {
        self.root.effective_level()
    }

    /// Concrete logger for `name`.
    pub fn cloud_logger(&self, name: &str) -> CloudLogger {
        CloudLogger::new(
            self.project_id.clone(),
            name,
            self.component.clone(),
            Arc::clone(&self.connector),
        )
        .with_parent_gate(Arc::clone(&self.root))
        .with_fallback(Arc::clone(&self.fallback))
        .with_client_failure_policy(self.on_client_failure)
    }

    /// State for [`super::middleware::cloud_trace_middleware`] bound to this project.
    #[cfg(feature = "middleware")]
    pub fn trace_state(&self) -> CloudTraceState {
        CloudTraceState::new(self.project_id.clone())
    }
}

impl LoggerFactory for CloudLoggerFactory {
    fn get_logger(&self, name: &str) -> Arc<dyn CtxLogger> {
        Arc::new(self.cloud_logger(name))
    }
}

/// Builder for [`CloudLoggerFactory`]
///
/// # Example
/// ```
/// use ctx_logger::prelude::*;
/// use ctx_logger::cloud::ClientFailurePolicy;
///
/// let factory = CloudLoggerFactory::builder("my-project")
///     .level(LogLevel::Warn)
///     .component("checkout")
///     .on_client_failure(ClientFailurePolicy::Drop)
///     .build();
///
/// let logger = factory.get_logger("orders");
/// assert!(!logger.info_enabled());
/// assert!(logger.warn_enabled());
/// ```
pub struct CloudLoggerFactoryBuilder {
    project_id: String,
    level: LogLevel,
    component: String,
    connector: Option<Arc<dyn ClientConnector>>,
    fallback: Option<Arc<FallbackSink>>,
    on_client_failure: ClientFailurePolicy,
}

impl CloudLoggerFactoryBuilder {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            level: LogLevel::Info,
            component: String::new(),
            connector: None,
            fallback: None,
            on_client_failure: ClientFailurePolicy::default(),
        }
    }

    /// Root threshold
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Component label placed in every payload
    #[must_use = "builder methods return a new value"]
    pub fn component(mut self, component: impl Into<String>) -> Self {
        self.component = component.into();
        self
    }

    /// Transport used to create clients. Defaults to the REST transport when
    /// the `http-client` feature is enabled.
    #[must_use = "builder methods return a new value"]
    pub fn connector(mut self, connector: Arc<dyn ClientConnector>) -> Self {
        self.connector = Some(connector);
        self
    }

    /// Sink for transport failures. Defaults to stderr.
    #[must_use = "builder methods return a new value"]
    pub fn fallback(mut self, fallback: Arc<FallbackSink>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn on_client_failure(mut self, policy: ClientFailurePolicy) -> Self {
        self.on_client_failure = policy;
        self
    }

    pub fn build(self) -> CloudLoggerFactory {
        CloudLoggerFactory {
            project_id: self.project_id,
            component: self.component,
            root: Arc::new(LevelGate::new(self.level)),
            connector: self.connector.unwrap_or_else(default_connector),
            fallback: self.fallback.unwrap_or_else(FallbackSink::shared_stderr),
            on_client_failure: self.on_client_failure,
        }
    }
}

#[cfg(feature = "http-client")]
fn default_connector() -> Arc<dyn ClientConnector> {
    Arc::new(super::http::HttpConnector::new())
}

#[cfg(not(feature = "http-client"))]
fn default_connector() -> Arc<dyn ClientConnector> {
    Arc::new(super::client::MissingConnector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::client::{LogClient, LogRecord, MissingConnector};
    use crate::core::{Logger, Result};
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Counting {
        connects: Mutex<usize>,
    }

    struct NullClient;

    impl LogClient for NullClient {
        fn log(&mut self, _log_name: &str, _record: LogRecord) -> Result<()> {
            Ok(())
        }
    }

    impl ClientConnector for Counting {
        fn connect(&self, _project_id: &str) -> Result<Box<dyn LogClient>> {
            *self.connects.lock() += 1;
            Ok(Box::new(NullClient))
        }
    }

    #[test]
    fn test_get_logger_uses_name_and_root_level() {
        let factory = CloudLoggerFactory::builder("proj")
            .level(LogLevel::Warn)
            .component("api")
            .connector(Arc::new(Counting::default()))
            .build();

        let logger = factory.cloud_logger("requests");
        assert_eq!(logger.name(), "requests");
        assert_eq!(logger.project_id(), "proj");
        assert_eq!(logger.component(), "api");
        assert_eq!(logger.level(), LogLevel::Warn);
    }

    #[test]
    fn test_factory_level_reaches_existing_loggers() {
        let factory = CloudLoggerFactory::builder("proj")
            .connector(Arc::new(Counting::default()))
            .build();
        let logger = factory.get_logger("requests");
        assert!(!logger.debug_enabled());

        factory.set_level(LogLevel::Debug);
        assert!(logger.debug_enabled());
        assert_eq!(factory.level(), LogLevel::Debug);
    }

    #[test]
    fn test_distinct_instances_per_call() {
        let factory = CloudLoggerFactory::builder("proj")
            .connector(Arc::new(Counting::default()))
            .build();
        let a = factory.get_logger("same");
        let b = factory.get_logger("same");

        a.set_level(LogLevel::Error);
        assert_eq!(a.level(), LogLevel::Error);
        assert_eq!(b.level(), LogLevel::Info);
    }

    #[test]
    fn test_one_connect_per_emitted_entry() {
        let counting = Arc::new(Counting::default());
        let factory = CloudLoggerFactory::builder("proj")
            .connector(counting.clone())
            .build();
        let logger = factory.get_logger("requests");

        logger.info(format_args!("one"));
        logger.error(format_args!("two"));
        logger.debug(format_args!("filtered"));

        assert_eq!(*counting.connects.lock(), 2);
    }

    #[test]
    fn test_missing_connector_type_is_usable() {
        let factory = CloudLoggerFactory::builder("proj")
            .connector(Arc::new(MissingConnector))
            .on_client_failure(ClientFailurePolicy::Drop)
            .fallback(Arc::new(FallbackSink::stderr()))
            .build();

        factory.get_logger("requests").info(format_args!("dropped, reported to stderr"));
    }

    #[cfg(feature = "http-client")]
    #[test]
    fn test_from_env() {
        std::env::remove_var(PROJECT_ENV);
        std::env::remove_var(ACCESS_TOKEN_ENV);
        match CloudLoggerFactory::from_env() {
            Err(LoggerError::InvalidConfiguration { message, .. }) => {
                assert!(message.contains(PROJECT_ENV));
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("missing project must be rejected"),
        }

        std::env::set_var(PROJECT_ENV, "");
        assert!(CloudLoggerFactory::from_env().is_err());

        std::env::set_var(PROJECT_ENV, "env-project");
        std::env::set_var(ACCESS_TOKEN_ENV, "token");
        let factory = CloudLoggerFactory::from_env().unwrap().build();
        assert_eq!(factory.project_id(), "env-project");
        assert_eq!(factory.level(), LogLevel::Info);

        std::env::remove_var(PROJECT_ENV);
        std::env::remove_var(ACCESS_TOKEN_ENV);
    }
}
