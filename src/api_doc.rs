use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers;
use crate::models::{
    RejectionResponse, RouteEntryResponse, RouteListResponse, RouteSpec, RoutesResponse,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "http-mock-server API",
        version = "1.0.0",
        description = "A configurable HTTP mock server with routes registered at runtime"
    ),
    paths(
        handlers::echo::echo_handler,
        handlers::status::status_handler,
        handlers::errors::errors_handler,
        handlers::health::healthz_handler,
        handlers::health::host_handler,
        handlers::route_admin::register_routes_handler,
        handlers::route_admin::list_routes_handler
    ),
    components(
        schemas(
            RouteSpec,
            RoutesResponse,
            RejectionResponse,
            RouteListResponse,
            RouteEntryResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "health", description = "Health and host information"),
        (name = "mock", description = "Echo and status code endpoints"),
        (name = "routes", description = "Runtime route management")
    )
)]
pub struct ApiDoc;
