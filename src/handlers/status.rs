use crate::error::{ApiError, ErrorResponse};
use crate::routes;
use axum::{extract::Path, http::StatusCode};

/// Parse a `/status/{code}` segment: exactly three ASCII digits, 100..=599
pub fn parse_status_code(raw: &str) -> Result<StatusCode, ApiError> {
    if raw.len() != 3 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::InvalidStatusCode(raw.to_string()));
    }
    raw.parse::<u16>()
        .ok()
        .filter(|code| (100..=599).contains(code))
        .and_then(|code| StatusCode::from_u16(code).ok())
        .ok_or_else(|| ApiError::InvalidStatusCode(raw.to_string()))
}

/// ANY /status/{code} handler - Respond with the requested status and no body
#[utoipa::path(
    method(get, post, put, delete, patch, head),
    path = routes::STATUS,
    params(
        ("code" = String, Path, description = "Three-digit HTTP status code between 100 and 599")
    ),
    responses(
        (status = 200, description = "Responds with the requested status; any code in 100..=599 is possible"),
        (status = 400, description = "Code is not a three-digit status between 100 and 599", body = ErrorResponse)
    ),
    tag = "mock"
)]
pub async fn status_handler(Path(code): Path<String>) -> Result<StatusCode, ApiError> {
    let status = parse_status_code(&code)?;
    tracing::debug!("Responding with requested status {}", status.as_u16());
    Ok(status)
}
