//! Axum router assembly.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use rfid_api_app::ports::RecordRepository;

use crate::error::ApiError;
use crate::state::AppState;

/// Transport limits wrapped around every route.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    /// Largest accepted request body. `None` removes the cap.
    pub max_body_bytes: Option<usize>,
    /// Requests still running after this are answered with 408.
    pub request_timeout: Duration,
}

/// Build the top-level axum [`Router`].
///
/// Mounts the authenticated `/rfid` routes next to an open `/health` check.
/// Includes a [`TraceLayer`] that logs each HTTP request/response using the
/// `tracing` ecosystem.
pub fn build<RR>(state: AppState<RR>) -> Router
where
    RR: RecordRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .merge(crate::api::routes(Arc::clone(&state.api_key)))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Same as [`build`], with a body size cap and a request timeout.
///
/// Both failures answer with the usual `{"error": ...}` JSON body.
pub fn build_with_limits<RR>(state: AppState<RR>, limits: Limits) -> Router
where
    RR: RecordRepository + Send + Sync + 'static,
{
    let body_limit = match limits.max_body_bytes {
        Some(max) => DefaultBodyLimit::max(max),
        None => DefaultBodyLimit::disable(),
    };

    build(state)
        .layer(body_limit)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            limits.request_timeout,
        ))
        .layer(middleware::map_response(timeout_as_json))
}

// The timeout layer answers with an empty body.
async fn timeout_as_json(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        ApiError::Timeout.into_response()
    } else {
        response
    }
}

async fn health_check() -> &'static str {
    "OK"
}
