//! Google Cloud Logging transport
//!
//! [`CloudLoggerFactory`] hands out [`CloudLogger`]s that map levels to the
//! service's severities, attach trace ids found in the call's context, and
//! write through a [`ClientConnector`]. With the `middleware` feature,
//! [`middleware::cloud_trace_middleware`] fills that context from incoming
//! axum requests.

pub mod client;
pub mod factory;
#[cfg(feature = "http-client")]
pub mod http;
pub mod logger;
#[cfg(feature = "middleware")]
pub mod middleware;

pub use client::{ClientConnector, LogClient, LogRecord, MissingConnector};
pub use factory::{CloudLoggerFactory, CloudLoggerFactoryBuilder};
#[cfg(feature = "http-client")]
pub use http::{HttpConnector, HttpLogClient};
pub use logger::{ClientFailurePolicy, CloudLogger};
#[cfg(feature = "middleware")]
pub use middleware::{cloud_trace_middleware, trace_resource_name, CloudTraceState};
