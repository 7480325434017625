use crate::error::{ApiError, ErrorResponse};
use crate::models::{RouteListResponse, RouteSpec, RoutesResponse};
use crate::registry::RouteBatch;
use crate::routes;
use crate::state::AppState;
use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde_json::Value as JsonValue;

/// POST /routes handler - Register routes at runtime
///
/// Accepts a JSON array of route entries (or a single entry). Valid entries
/// are inserted, replacing any existing route with the same method and path;
/// invalid entries are reported back by index without affecting the rest.
/// The body is read as raw bytes so no `Content-Type` header is required.
#[utoipa::path(
    post,
    path = routes::ROUTES,
    request_body = Vec<RouteSpec>,
    responses(
        (status = 200, description = "Batch applied; see `rejected` for refused entries", body = RoutesResponse),
        (status = 400, description = "Body is not JSON or not a list of routes", body = ErrorResponse)
    ),
    tag = "routes"
)]
pub async fn register_routes_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<RoutesResponse>), ApiError> {
    let payload: JsonValue = serde_json::from_slice(&body)?;
    let batch = RouteBatch::from_json(payload)?;

    let report = state.registry.apply(batch);
    tracing::info!(
        "Route registration: {} inserted, {} rejected, {} total registered",
        report.inserted,
        report.rejected.len(),
        state.registry.len()
    );

    Ok((StatusCode::OK, Json(report.into())))
}

/// GET /routes handler - List registered routes
#[utoipa::path(
    get,
    path = routes::ROUTES,
    responses(
        (status = 200, description = "Registered routes ordered by path, then method", body = RouteListResponse)
    ),
    tag = "routes"
)]
pub async fn list_routes_handler(State(state): State<AppState>) -> Json<RouteListResponse> {
    Json(RouteListResponse {
        routes: state
            .registry
            .snapshot()
            .into_iter()
            .map(Into::into)
            .collect(),
    })
}
