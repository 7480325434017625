use serde::{Deserialize, Serialize};

use crate::registry::{InsertReport, Rejection, RouteKey, RouteDefinition};

fn default_method() -> String {
    "GET".to_string()
}

fn default_code() -> u16 {
    200
}

/// A single route registration entry, as posted to `/routes` or listed in a
/// routes file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RouteSpec {
    /// Exact request path, e.g. `/api/users`. Required.
    #[serde(default)]
    pub path: Option<String>,
    /// HTTP method, case-insensitive
    #[serde(default = "default_method")]
    pub method: String,
    /// Response body served for the route
    #[serde(default)]
    pub response: String,
    /// Response status code in 100..=599
    #[serde(default = "default_code")]
    pub code: u16,
    /// When set, the route answers with a randomly injected status instead
    #[serde(default)]
    pub error: bool,
}

/// Per-entry rejection in a registration response
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RejectionResponse {
    pub index: usize,
    pub path: Option<String>,
    pub method: Option<String>,
    pub error: String,
}

/// Response type for route registration
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RoutesResponse {
    pub inserted: usize,
    pub rejected: Vec<RejectionResponse>,
}

/// A registered route as reported by `GET /routes`
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RouteEntryResponse {
    pub method: String,
    pub path: String,
    pub code: u16,
    pub response: String,
    pub error: bool,
}

/// Response type for the route listing endpoint
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RouteListResponse {
    pub routes: Vec<RouteEntryResponse>,
}

impl From<Rejection> for RejectionResponse {
    fn from(rejection: Rejection) -> Self {
        RejectionResponse {
            index: rejection.index,
            path: rejection.path,
            method: rejection.method,
            error: rejection.error.to_string(),
        }
    }
}

impl From<InsertReport> for RoutesResponse {
    fn from(report: InsertReport) -> Self {
        RoutesResponse {
            inserted: report.inserted,
            rejected: report.rejected.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<(RouteKey, RouteDefinition)> for RouteEntryResponse {
    fn from((key, definition): (RouteKey, RouteDefinition)) -> Self {
        RouteEntryResponse {
            method: key.method.to_string(),
            path: key.path,
            code: definition.status.as_u16(),
            response: String::from_utf8_lossy(&definition.body).into_owned(),
            error: definition.inject_fault,
        }
    }
}
