use crate::error::ApiError;
use crate::registry::decode_path;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, HeaderValue, Method, Uri},
    response::{IntoResponse, Response},
};

/// Fallback handler - Serve routes registered at runtime
///
/// Runs only when no built-in path matched. Looks up the method and the
/// percent-decoded path (query string ignored) in the registry and answers
/// with the stored status and body, or with an injected fault for routes
/// flagged `error`. HEAD falls back to the GET route, as the built-ins do.
pub async fn dynamic_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Result<Response, ApiError> {
    let path = decode_path(uri.path());
    tracing::debug!("Entering dynamic route handler for: {} {}", method, path);

    let route = state.registry.lookup(&method, &path).or_else(|| {
        if method == Method::HEAD {
            state.registry.lookup(&Method::GET, &path)
        } else {
            None
        }
    });
    let Some(route) = route else {
        tracing::warn!("Route not found: {} {}", method, path);
        return Err(ApiError::RouteNotFound { method, path });
    };

    if route.inject_fault {
        let status = state.faults.pick();
        tracing::debug!("Injecting status {} for {} {}", status.as_u16(), method, path);
        return Ok(status.into_response());
    }

    Ok((
        route.status,
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        )],
        route.body,
    )
        .into_response())
}
