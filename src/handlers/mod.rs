pub mod dynamic;
pub mod echo;
pub mod errors;
pub mod health;
pub mod route_admin;
pub mod status;

pub use dynamic::dynamic_handler;
pub use echo::echo_handler;
pub use errors::errors_handler;
pub use health::{healthz_handler, host_handler};
pub use route_admin::{list_routes_handler, register_routes_handler};
pub use status::status_handler;
