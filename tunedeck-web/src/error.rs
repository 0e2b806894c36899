//! HTTP error shaping
//!
//! Maps the common error taxonomy onto status codes and `{"error": ...}`
//! JSON bodies. Storage and I/O failures are reported with a generic body;
//! the detail goes to the log only. Upstream search-provider messages are
//! passed through, as the client surfaces them.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;
use tunedeck_common::Error;

/// Result alias for HTTP handlers
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Wrapper turning a common error into an HTTP response
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            Error::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            // Duplicate track/favorite reports 400 (endpoint contract)
            Error::Conflict(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            Error::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Error::Upstream(msg) => {
                error!("upstream search provider failure: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            Error::Database(err) => {
                error!("database error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
            Error::Io(err) => {
                error!("io error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
            Error::Config(msg) | Error::Internal(msg) => {
                error!("internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
