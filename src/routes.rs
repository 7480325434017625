// Route path constants - single source of truth for all built-in paths

pub const ECHO: &str = "/echo";
pub const STATUS: &str = "/status/{code}";
pub const ERRORS: &str = "/errors";
pub const HEALTHZ: &str = "/healthz";
pub const HOST: &str = "/host";
pub const ROUTES: &str = "/routes";

pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
