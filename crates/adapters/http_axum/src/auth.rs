//! `X-API-Key` gate in front of the record routes.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;

use rfid_api_domain::auth::ApiKey;

use crate::error::ApiError;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Reject the request with 401 unless it carries the configured key.
pub async fn require_api_key(
    State(api_key): State<Arc<ApiKey>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = request
        .headers()
        .get(API_KEY_HEADER)
        .map(HeaderValue::as_bytes);

    if !api_key.verify(presented) {
        tracing::warn!(
            method = %request.method(),
            uri = %request.uri(),
            "rejected request with missing or invalid api key"
        );
        return Err(ApiError::Unauthorized);
    }

    Ok(next.run(request).await)
}
