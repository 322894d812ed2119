//! Google Cloud Logging REST transport
//!
//! Writes records through the `entries:write` method of the Logging v2 API.
//! Each write runs a `reqwest::blocking` client on a scoped worker thread, so
//! logging is safe from inside an async runtime such as an axum handler.

use super::client::{ClientConnector, LogClient, LogRecord};
use crate::core::{LoggerError, Result, Severity, StructuredEntry};
use serde::Serialize;
use std::time::Duration;

/// Default `entries:write` endpoint
pub const DEFAULT_ENDPOINT: &str = "https://logging.googleapis.com/v2/entries:write";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connector creating one [`HttpLogClient`] per call
#[derive(Debug, Clone)]
pub struct HttpConnector {
    endpoint: String,
    bearer_token: Option<String>,
    timeout: Duration,
}

impl HttpConnector {
    pub fn new() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            bearer_token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the endpoint, e.g. for an emulator or proxy
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// OAuth access token sent as `Authorization: Bearer <token>`
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for HttpConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientConnector for HttpConnector {
    fn connect(&self, project_id: &str) -> Result<Box<dyn LogClient>> {
        if project_id.is_empty() {
            return Err(LoggerError::transport(project_id, "project id is empty"));
        }

        Ok(Box::new(HttpLogClient {
            endpoint: self.endpoint.clone(),
            bearer_token: self.bearer_token.clone(),
            timeout: self.timeout,
            project_id: project_id.to_string(),
        }))
    }
}

/// Client bound to one project
#[derive(Debug)]
pub struct HttpLogClient {
    endpoint: String,
    bearer_token: Option<String>,
    timeout: Duration,
    project_id: String,
}

impl HttpLogClient {
    /// Build a blocking client, send `body` and drop the client.
    ///
    /// Must not run on an async runtime thread: the blocking client owns a
    /// runtime of its own that panics when dropped there.
    fn post(&self, body: &WriteEntriesRequest) -> Result<()> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| {
                LoggerError::transport(&self.project_id, format!("Failed to create HTTP client: {}", e))
            })?;

        let mut request = client.post(&self.endpoint).json(body);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().map_err(|e| {
            LoggerError::transport(&self.project_id, format!("Request failed: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(LoggerError::http_status(status.as_u16(), message));
        }
        Ok(())
    }
}

impl LogClient for HttpLogClient {
    fn log(&mut self, log_name: &str, record: LogRecord) -> Result<()> {
        let body = WriteEntriesRequest::new(&self.project_id, log_name, record);
        let client = &*self;

        std::thread::scope(|scope| {
            scope
                .spawn(|| client.post(&body))
                .join()
                .unwrap_or_else(|_| {
                    Err(LoggerError::transport(
                        &client.project_id,
                        "HTTP worker thread panicked",
                    ))
                })
        })
    }
}

/// Fully qualified log name; the log id is URL-encoded as the API requires.
pub fn log_resource_name(project_id: &str, log_name: &str) -> String {
    format!(
        "projects/{}/logs/{}",
        project_id,
        urlencoding::encode(log_name)
    )
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WriteEntriesRequest {
    log_name: String,
    resource: MonitoredResource,
    entries: Vec<ApiEntry>,
}

impl WriteEntriesRequest {
    fn new(project_id: &str, log_name: &str, record: LogRecord) -> Self {
        Self {
            log_name: log_resource_name(project_id, log_name),
            resource: MonitoredResource { kind: "global" },
            entries: vec![ApiEntry::from(record)],
        }
    }
}

#[derive(Debug, Serialize)]
struct MonitoredResource {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiEntry {
    severity: Severity,
    json_payload: StructuredEntry,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<String>,
    timestamp: String,
}

impl From<LogRecord> for ApiEntry {
    fn from(record: LogRecord) -> Self {
        Self {
            severity: record.severity,
            json_payload: record.payload,
            trace: record.trace,
            timestamp: record
                .timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Nanos, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_resource_name_encodes_id() {
        assert_eq!(
            log_resource_name("proj", "api/requests"),
            "projects/proj/logs/api%2Frequests"
        );
    }

    #[test]
    fn test_empty_project_rejected() {
        let result = HttpConnector::new().connect("");
        assert!(matches!(result, Err(LoggerError::Transport { .. })));
    }

    #[test]
    fn test_write_request_body() {
        let record = LogRecord::new(
            Severity::Error,
            StructuredEntry::new("payment failed").with_component("billing"),
        )
        .with_trace("projects/proj/traces/abc123");

        let body = WriteEntriesRequest::new("proj", "payments", record);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["logName"], "projects/proj/logs/payments");
        assert_eq!(json["resource"]["type"], "global");
        let entry = &json["entries"][0];
        assert_eq!(entry["severity"], "ERROR");
        assert_eq!(entry["jsonPayload"]["message"], "payment failed");
        assert_eq!(entry["jsonPayload"]["component"], "billing");
        assert_eq!(entry["trace"], "projects/proj/traces/abc123");
        assert!(entry["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_connector_configuration() {
        let connector = HttpConnector::new()
            .with_endpoint("http://127.0.0.1:8085/v2/entries:write")
            .with_bearer_token("token")
            .with_timeout(Duration::from_secs(1));

        assert_eq!(connector.endpoint(), "http://127.0.0.1:8085/v2/entries:write");
        assert_eq!(connector.bearer_token.as_deref(), Some("token"));
    }
}
