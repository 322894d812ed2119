//! Tests for the trace propagation middleware

#![cfg(feature = "middleware")]

use axum::{
    body::Body,
    extract::Request,
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use ctx_logger::cloud::{cloud_trace_middleware, CloudTraceState};
use ctx_logger::prelude::*;
use parking_lot::Mutex;
use std::sync::Arc;
use tower::ServiceExt;

type Seen = Arc<Mutex<Option<Option<Context>>>>;

/// Router whose handler records the `Context` extension it received.
fn app(project_id: &str, seen: Seen) -> Router {
    Router::new()
        .route(
            "/",
            get(move |request: Request| {
                let seen = Arc::clone(&seen);
                async move {
                    *seen.lock() = Some(request.extensions().get::<Context>().cloned());
                    "ok"
                }
            }),
        )
        .layer(middleware::from_fn_with_state(
            CloudTraceState::new(project_id),
            cloud_trace_middleware,
        ))
}

fn request_with(header: Option<&str>) -> Request {
    let mut builder = Request::builder().uri("/");
    if let Some(value) = header {
        builder = builder.header(CLOUD_TRACE_CONTEXT, value);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_header_sets_trace_resource() {
    let seen: Seen = Arc::default();
    let response = app("proj", Arc::clone(&seen))
        .oneshot(request_with(Some("abc123/1;o=1")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let ctx = seen.lock().clone().flatten().expect("context stored");
    assert_eq!(ctx.trace(), Some("projects/proj/traces/abc123"));
}

#[tokio::test]
async fn test_absent_header_passes_through() {
    let seen: Seen = Arc::default();
    let response = app("proj", Arc::clone(&seen))
        .oneshot(request_with(None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    // Handler ran, and no context was attached
    assert!(matches!(*seen.lock(), Some(None)));
}

#[tokio::test]
async fn test_empty_trace_id_passes_through() {
    let seen: Seen = Arc::default();
    app("proj", Arc::clone(&seen))
        .oneshot(request_with(Some("/1;o=1")))
        .await
        .unwrap();

    assert!(matches!(*seen.lock(), Some(None)));
}

#[tokio::test]
async fn test_empty_project_passes_through() {
    let seen: Seen = Arc::default();
    app("", Arc::clone(&seen))
        .oneshot(request_with(Some("abc123/1;o=1")))
        .await
        .unwrap();

    assert!(matches!(*seen.lock(), Some(None)));
}

#[tokio::test]
async fn test_existing_context_fields_are_kept() {
    async fn seed(mut request: Request, next: Next) -> Response {
        request
            .extensions_mut()
            .insert(Context::background().with_value("request_id", "r-42"));
        next.run(request).await
    }

    let seen: Seen = Arc::default();
    let app = app("proj", Arc::clone(&seen)).layer(middleware::from_fn(seed));
    app.oneshot(request_with(Some("abc123/1;o=1"))).await.unwrap();

    let ctx = seen.lock().clone().flatten().expect("context stored");
    assert_eq!(ctx.trace(), Some("projects/proj/traces/abc123"));
    assert_eq!(
        ctx.value("request_id").and_then(FieldValue::as_str),
        Some("r-42")
    );
}

#[tokio::test]
async fn test_context_extractor_feeds_logger() {
    use ctx_logger::cloud::{ClientConnector, ClientFailurePolicy, LogClient, LogRecord};

    #[derive(Default)]
    struct Capture(Arc<Mutex<Vec<LogRecord>>>);

    struct CaptureClient(Arc<Mutex<Vec<LogRecord>>>);

    impl LogClient for CaptureClient {
        fn log(&mut self, _log_name: &str, record: LogRecord) -> ctx_logger::Result<()> {
            self.0.lock().push(record);
            Ok(())
        }
    }

    impl ClientConnector for Capture {
        fn connect(&self, _project_id: &str) -> ctx_logger::Result<Box<dyn LogClient>> {
            Ok(Box::new(CaptureClient(Arc::clone(&self.0))))
        }
    }

    let capture = Arc::new(Capture::default());
    let factory = CloudLoggerFactory::builder("proj")
        .connector(capture.clone())
        .on_client_failure(ClientFailurePolicy::Drop)
        .build();
    let logger = factory.get_logger("requests");
    let state = factory.trace_state();

    let app = Router::new()
        .route(
            "/",
            get(move |ctx: Context| {
                let logger = Arc::clone(&logger);
                async move {
                    logger.info_ctx(&ctx, format_args!("handled"));
                    "ok"
                }
            }),
        )
        .layer(middleware::from_fn_with_state(state, cloud_trace_middleware));

    app.oneshot(request_with(Some("feedbeef/7;o=1"))).await.unwrap();

    let records = capture.0.lock();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].trace.as_deref(), Some("projects/proj/traces/feedbeef"));
}
