use axum::{
    extract::DefaultBodyLimit,
    routing::{any, get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::routes;
use crate::state::AppState;

/// Build the request dispatcher.
///
/// Built-in paths are matched first. A built-in path requested with a method
/// it does not serve gets 405 and never reaches the registry, so a registered
/// route that collides with a built-in is stored but unreachable. Everything
/// else falls through to the registry lookup.
pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.body_limit);

    Router::new()
        .route(routes::ECHO, post(handlers::echo_handler))
        .route(routes::STATUS, any(handlers::status_handler))
        .route(routes::ERRORS, any(handlers::errors_handler))
        .route(routes::HEALTHZ, get(handlers::healthz_handler))
        .route(routes::HOST, get(handlers::host_handler))
        .route(
            routes::ROUTES,
            post(handlers::register_routes_handler)
                .put(handlers::register_routes_handler)
                .get(handlers::list_routes_handler),
        )
        .merge(SwaggerUi::new(routes::SWAGGER_UI).url(routes::OPENAPI_JSON, ApiDoc::openapi()))
        .fallback(handlers::dynamic_handler)
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
