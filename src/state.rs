use crate::config::Config;
use crate::faults::FaultInjector;
use crate::registry::RouteRegistry;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<RouteRegistry>,
    pub faults: FaultInjector,
    pub hostname: Arc<str>,
    /// Largest request body any handler will read
    pub body_limit: usize,
}

impl AppState {
    /// Fresh state with an empty registry
    pub fn from_config(config: &Config) -> Self {
        AppState {
            registry: Arc::new(RouteRegistry::new()),
            faults: FaultInjector::new(config.error_percentage),
            hostname: resolve_hostname().into(),
            body_limit: config.max_body_bytes,
        }
    }
}

fn resolve_hostname() -> String {
    gethostname::gethostname()
        .into_string()
        .unwrap_or_else(|_| String::from("Unknown Host"))
}
