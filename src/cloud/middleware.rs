//! Trace propagation for axum handlers
//!
//! Cloud load balancers tag each request with an `X-Cloud-Trace-Context`
//! header of the form `<trace-id>/<span-id>;o=<options>`. The middleware
//! turns the trace id into `projects/<project>/traces/<trace-id>` and stores it
//! in the request's [`Context`] so handlers can pass it to `*_ctx` log calls.
//!
//! ```no_run
//! use axum::{middleware, routing::get, Router};
//! use ctx_logger::cloud::middleware::{cloud_trace_middleware, CloudTraceState};
//! use ctx_logger::core::Context;
//!
//! async fn handler(ctx: Context) -> &'static str {
//!     let _ = ctx.trace();
//!     "ok"
//! }
//!
//! let app: Router = Router::new()
//!     .route("/", get(handler))
//!     .layer(middleware::from_fn_with_state(
//!         CloudTraceState::new("my-project"),
//!         cloud_trace_middleware,
//!     ));
//! ```

use crate::core::{Context, CLOUD_TRACE_CONTEXT};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use std::convert::Infallible;

/// Project the middleware formats trace names for
#[derive(Debug, Clone, Default)]
pub struct CloudTraceState {
    project_id: String,
}

impl CloudTraceState {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }
}

/// Trace resource name for a raw header value.
///
/// Returns `None` when the project is empty or the header has no trace id.
pub fn trace_resource_name(project_id: &str, header: &str) -> Option<String> {
    if project_id.is_empty() {
        return None;
    }
    let trace_id = header.split('/').next().filter(|id| !id.is_empty())?;
    Some(format!("projects/{}/traces/{}", project_id, trace_id))
}

/// Store the request's trace in its [`Context`] extension.
///
/// Requests without a usable header pass through untouched.
pub async fn cloud_trace_middleware(
    State(state): State<CloudTraceState>,
    mut request: Request,
    next: Next,
) -> Response {
    let trace = request
        .headers()
        .get(CLOUD_TRACE_CONTEXT)
        .and_then(|value| value.to_str().ok())
        .and_then(|header| trace_resource_name(&state.project_id, header));

    if let Some(trace) = trace {
        let ctx = request
            .extensions()
            .get::<Context>()
            .cloned()
            .unwrap_or_default()
            .with_value(CLOUD_TRACE_CONTEXT, trace);
        request.extensions_mut().insert(ctx);
    }

    next.run(request).await
}

/// Extracts the request's [`Context`], or an empty one if none was stored.
impl<S> FromRequestParts<S> for Context
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Context>().cloned().unwrap_or_default())
    }
}
