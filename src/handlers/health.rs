use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode};

/// GET /healthz handler - Liveness check
///
/// Always answers `OK`; it does not depend on the route registry.
#[utoipa::path(
    get,
    path = routes::HEALTHZ,
    responses(
        (status = 200, description = "Service is up", body = String)
    ),
    tag = "health"
)]
pub async fn healthz_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

/// GET /host handler - Report the host name of the serving process
#[utoipa::path(
    get,
    path = routes::HOST,
    responses(
        (status = 200, description = "Host name", body = String)
    ),
    tag = "health"
)]
pub async fn host_handler(State(state): State<AppState>) -> (StatusCode, String) {
    (StatusCode::OK, state.hostname.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{body::Body, http::Request, routing::get, Router};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(state: AppState) -> Router {
        Router::new()
            .route(routes::HEALTHZ, get(healthz_handler))
            .route(routes::HOST, get(host_handler))
            .with_state(state)
    }

    #[tokio::test]
    async fn test_healthz_ok() {
        let response = app(AppState::from_config(&Config::default()))
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/healthz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"OK");
    }

    #[tokio::test]
    async fn test_host_returns_state_hostname() {
        let mut state = AppState::from_config(&Config::default());
        state.hostname = Arc::from("mock-host-01");

        let response = app(state)
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/host")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"mock-host-01");
    }

    #[tokio::test]
    async fn test_host_resolves_real_hostname() {
        let state = AppState::from_config(&Config::default());
        assert!(!state.hostname.is_empty());
    }
}
