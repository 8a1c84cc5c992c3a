//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::{BytesRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use rfid_api_domain::error::{RfidError, ValidationError};

/// Body of every 401 response.
pub const UNAUTHORIZED_MESSAGE: &str = "Invalid or missing API key";

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Body of every 408 response.
pub const TIMEOUT_MESSAGE: &str = "Request timed out";

/// Failure of an API request.
///
/// Only a bad credential and an expired request get their own status.
/// Everything else, input problems included, is a 500 whose body carries the
/// error message as is.
pub enum ApiError {
    /// Missing, empty or wrong `X-API-Key`.
    Unauthorized,
    /// The query string could not be deserialized.
    Query(QueryRejection),
    /// The request body could not be read, e.g. it exceeds the size limit.
    Body(BytesRejection),
    /// The request ran past the configured timeout.
    Timeout,
    /// Validation or storage failure from the application layer.
    Domain(RfidError),
}

impl From<RfidError> for ApiError {
    fn from(err: RfidError) -> Self {
        Self::Domain(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Domain(err.into())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Query(rejection)
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        Self::Body(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, UNAUTHORIZED_MESSAGE.to_string()),
            Self::Query(rejection) => {
                let message = rejection.body_text();
                tracing::warn!(error = %message, "invalid query string");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
            Self::Body(rejection) => {
                let message = rejection.body_text();
                tracing::warn!(
                    error = %message,
                    status = %rejection.status(),
                    "unreadable request body"
                );
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
            Self::Timeout => {
                tracing::warn!("request timed out");
                (StatusCode::REQUEST_TIMEOUT, TIMEOUT_MESSAGE.to_string())
            }
            Self::Domain(err) => {
                match &err {
                    RfidError::Validation(_) => tracing::warn!(error = %err, "invalid request"),
                    RfidError::Storage(_) => tracing::error!(error = %err, "storage error"),
                }
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
