use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::models::RouteSpec;
use crate::registry::RouteBatch;

/// Layout of a routes file: a `routes` map keyed by request path.
///
/// ```yaml
/// routes:
///   /hello:
///     method: GET
///     response: "hi"
///     code: 200
/// ```
#[derive(Debug, Deserialize)]
struct RoutesFile {
    #[serde(default)]
    routes: BTreeMap<String, RouteSpec>,
    // Server settings belong in the environment; these are only read to warn.
    #[serde(default)]
    error_percentage: Option<serde_yaml::Value>,
    #[serde(default)]
    port: Option<serde_yaml::Value>,
    #[serde(default)]
    hostname: Option<serde_yaml::Value>,
}

impl RoutesFile {
    /// Settings present in the file that are taken from the environment instead
    fn ignored_settings(&self) -> Vec<(&'static str, &'static str)> {
        [
            ("error_percentage", "ERROR_PERCENTAGE", self.error_percentage.is_some()),
            ("port", "SERVICE_PORT", self.port.is_some()),
            ("hostname", "SERVICE_HOST", self.hostname.is_some()),
        ]
        .into_iter()
        .filter(|(_, _, present)| *present)
        .map(|(key, var, _)| (key, var))
        .collect()
    }
}

/// Read and validate the routes file at `path`.
pub fn load_routes_file(path: &Path) -> Result<RouteBatch> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read routes file {}", path.display()))?;
    parse_routes(&contents)
        .with_context(|| format!("Failed to parse routes file {}", path.display()))
}

/// Parse a routes document. Entries without a `path` take their map key.
pub fn parse_routes(contents: &str) -> Result<RouteBatch> {
    let file: RoutesFile = serde_yaml::from_str(contents)?;
    for (key, var) in file.ignored_settings() {
        tracing::warn!("Routes file sets '{}', which is ignored; use {} instead", key, var);
    }

    let specs = file.routes.into_iter().map(|(key, mut spec)| {
        spec.path.get_or_insert(key);
        spec
    });

    Ok(RouteBatch::from_specs(specs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{RouteError, RouteKey};
    use axum::http::{Method, StatusCode};

    #[test]
    fn test_parse_routes_uses_map_key_as_path() {
        let batch = parse_routes(
            r#"
routes:
  /hello:
    method: GET
    response: "hi"
    code: 200
  /created:
    method: post
    response: "made"
    code: 201
"#,
        )
        .unwrap();

        assert!(batch.rejected().is_empty());
        let keys: Vec<_> = batch.accepted().iter().map(|(key, _)| key.clone()).collect();
        assert_eq!(
            keys,
            vec![
                RouteKey::new(Method::POST, "/created"),
                RouteKey::new(Method::GET, "/hello"),
            ]
        );
        assert_eq!(batch.accepted()[0].1.status, StatusCode::CREATED);
    }

    #[test]
    fn test_parse_routes_explicit_path_wins() {
        let batch = parse_routes(
            r#"
routes:
  alias:
    path: /real
    response: "x"
"#,
        )
        .unwrap();

        assert_eq!(batch.accepted()[0].0, RouteKey::new(Method::GET, "/real"));
    }

    #[test]
    fn test_parse_routes_error_flag() {
        let batch = parse_routes(
            r#"
routes:
  /flaky:
    method: GET
    response: "maybe"
    code: 200
    error: true
"#,
        )
        .unwrap();

        assert!(batch.accepted()[0].1.inject_fault);
    }

    #[test]
    fn test_parse_routes_rejects_invalid_entries() {
        let batch = parse_routes(
            r#"
routes:
  /ok:
    code: 200
  /bad:
    code: 42
"#,
        )
        .unwrap();

        assert_eq!(batch.accepted().len(), 1);
        assert_eq!(batch.rejected().len(), 1);
        assert_eq!(batch.rejected()[0].error, RouteError::InvalidStatusCode(42));
    }

    #[test]
    fn test_server_settings_in_file_are_reported() {
        let file: RoutesFile = serde_yaml::from_str(
            r#"
error_percentage: "20"
port: "9000"
hostname: 127.0.0.1
routes:
  /ok:
    code: 200
"#,
        )
        .unwrap();

        assert_eq!(
            file.ignored_settings(),
            vec![
                ("error_percentage", "ERROR_PERCENTAGE"),
                ("port", "SERVICE_PORT"),
                ("hostname", "SERVICE_HOST"),
            ]
        );
        assert_eq!(file.routes.len(), 1);
    }

    #[test]
    fn test_parse_routes_with_server_settings_still_loads_routes() {
        let batch = parse_routes("port: \"9000\"\nroutes:\n  /ok:\n    code: 200\n").unwrap();
        assert_eq!(batch.accepted().len(), 1);
    }

    #[test]
    fn test_routes_only_file_has_no_ignored_settings() {
        let file: RoutesFile = serde_yaml::from_str("routes:\n  /ok:\n    code: 200\n").unwrap();
        assert!(file.ignored_settings().is_empty());
    }

    #[test]
    fn test_parse_routes_empty_document() {
        let batch = parse_routes("routes: {}\n").unwrap();
        assert!(batch.accepted().is_empty());
    }

    #[test]
    fn test_parse_routes_invalid_yaml() {
        assert!(parse_routes("routes: [unclosed").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_routes_file(Path::new("/definitely/not/here/routes.yml"));
        let error = result.unwrap_err();
        assert!(error.to_string().contains("Failed to read routes file"));
    }

    #[test]
    fn test_load_routes_file_from_disk() {
        let path = std::env::temp_dir().join(format!("routes-{}.yml", std::process::id()));
        fs::write(&path, "routes:\n  /disk:\n    response: \"from disk\"\n").unwrap();

        let batch = load_routes_file(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(batch.accepted()[0].0, RouteKey::new(Method::GET, "/disk"));
    }
}
