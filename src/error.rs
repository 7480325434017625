use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::registry::BatchError;

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Custom error type for API endpoints
///
/// Every failure the server can hit while handling a request ends up here and
/// is rendered as a JSON `ErrorResponse` with the matching status code.
#[derive(Debug)]
pub enum ApiError {
    /// Path segment of `/status/{code}` is not a usable status code
    InvalidStatusCode(String),
    /// Route registration body is not JSON, or not a list of routes
    InvalidPayload(String),
    /// Nothing built-in or registered matches the request
    RouteNotFound { method: Method, path: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::InvalidStatusCode(code) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid status code: expected a three-digit code between 100 and 599, got '{}'", code),
            ),
            ApiError::InvalidPayload(msg) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid route payload: {}", msg),
            ),
            ApiError::RouteNotFound { method, path } => (
                StatusCode::NOT_FOUND,
                format!("No route registered for {} {}", method, path),
            ),
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidPayload(err.to_string())
    }
}

impl From<BatchError> for ApiError {
    fn from(err: BatchError) -> Self {
        ApiError::InvalidPayload(err.to_string())
    }
}
