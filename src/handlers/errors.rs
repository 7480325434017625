use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode};

/// ANY /errors handler - Respond with a randomly chosen status
///
/// Each request is an independent draw: 200 or one of the fault codes,
/// weighted by the configured error percentage.
#[utoipa::path(
    method(get, post, put, delete, patch, head),
    path = routes::ERRORS,
    responses(
        (status = 200, description = "Success draw"),
        (status = 500, description = "Fault draw; any of 400, 401, 403, 408, 409, 500, 502, 503, 504")
    ),
    tag = "mock"
)]
pub async fn errors_handler(State(state): State<AppState>) -> StatusCode {
    let status = state.faults.pick();
    tracing::debug!("Picked status {} for /errors", status.as_u16());
    status
}
