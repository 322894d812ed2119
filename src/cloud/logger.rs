//! Logger shipping entries to Google Cloud Logging

use super::client::{ClientConnector, LogRecord};
use crate::core::{
    Context, CtxLogger, FallbackSink, LevelGate, LogLevel, Logger, LoggerError, Severity,
    StructuredEntry,
};
use std::fmt::Arguments;
use std::sync::Arc;

/// What to do when no log client can be created.
///
/// `Exit` reproduces the crash-fast behaviour of treating an unusable logging
/// backend as fatal: the failure is written to the fallback sink and the
/// process exits with status 1. `Drop` writes the failure to the fallback
/// sink and discards the entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClientFailurePolicy {
    #[default]
    Exit,
    Drop,
}

/// Logger writing each entry synchronously to a named cloud log.
///
/// Every emitted entry acquires a fresh client from the connector, writes
/// one record and releases the client, so each call may block on a network
/// round-trip.
pub struct CloudLogger {
    project_id: String,
    log_name: String,
    component: String,
    gate: Arc<LevelGate>,
    connector: Arc<dyn ClientConnector>,
    fallback: Arc<FallbackSink>,
    on_client_failure: ClientFailurePolicy,
}

impl CloudLogger {
    /// Standalone logger with an unset level; it stays silent until
    /// [`Logger::set_level`] is called.
    pub fn new(
        project_id: impl Into<String>,
        log_name: impl Into<String>,
        component: impl Into<String>,
        connector: Arc<dyn ClientConnector>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            log_name: log_name.into(),
            component: component.into(),
            gate: Arc::new(LevelGate::default()),
            connector,
            fallback: FallbackSink::shared_stderr(),
            on_client_failure: ClientFailurePolicy::default(),
        }
    }

    /// Inherit the level from `parent` while unset.
    #[must_use]
    pub fn with_parent_gate(mut self, parent: Arc<LevelGate>) -> Self {
        self.gate = Arc::new(LevelGate::child_of(parent));
        self
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: Arc<FallbackSink>) -> Self {
        self.fallback = fallback;
        self
    }

    #[must_use]
    pub fn with_client_failure_policy(mut self, policy: ClientFailurePolicy) -> Self {
        self.on_client_failure = policy;
        self
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    /// Record for one entry, before it reaches a client
    pub fn build_record(&self, ctx: &Context, severity: Severity, message: String) -> LogRecord {
        let payload = StructuredEntry::new(message).with_component(self.component.as_str());
        let record = LogRecord::new(severity, payload);
        match ctx.trace() {
            Some(trace) => record.with_trace(trace),
            None => record,
        }
    }

    fn ship(&self, record: LogRecord) {
        let mut client = match self.connector.connect(&self.project_id) {
            Ok(client) => client,
            Err(e) => {
                self.client_unavailable(e);
                return;
            }
        };

        if let Err(e) = client.log(&self.log_name, record) {
            self.fallback.report(
                LogLevel::Error,
                format!("Failed to write entry to log '{}': {}", self.log_name, e),
            );
        }
    }

    fn client_unavailable(&self, error: LoggerError) {
        self.fallback
            .report(LogLevel::Error, format!("Failed to create client: {}", error));
        if self.on_client_failure == ClientFailurePolicy::Exit {
            std::process::exit(1);
        }
    }
}

impl Logger for CloudLogger {
    fn name(&self) -> &str {
        &self.log_name
    }

    fn gate(&self) -> &LevelGate {
        &self.gate
    }

    fn print(&self, level: LogLevel, args: Arguments<'_>) {
        self.print_ctx(&Context::background(), level, args);
    }
}

impl CtxLogger for CloudLogger {
    fn print_ctx(&self, ctx: &Context, level: LogLevel, args: Arguments<'_>) {
        if !self.loggable(level) {
            return;
        }
        let Some(severity) = Severity::from_level(level) else {
            return;
        };

        let record = self.build_record(ctx, severity, args.to_string());
        self.ship(record);
    }
}

impl std::fmt::Debug for CloudLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudLogger")
            .field("project_id", &self.project_id)
            .field("log_name", &self.log_name)
            .field("component", &self.component)
            .field("level", &self.gate.effective_level())
            .field("on_client_failure", &self.on_client_failure)
            .finish()
    }
}
