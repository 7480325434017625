use axum::body::Bytes;
use axum::http::{Method, StatusCode};
use parking_lot::RwLock;
use serde_json::Value as JsonValue;
use std::collections::HashMap;

use crate::models::RouteSpec;

/// Identifies a registered route. Later registrations with the same key
/// replace earlier ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    pub method: Method,
    pub path: String,
}

impl RouteKey {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        RouteKey {
            method,
            path: path.into(),
        }
    }
}

/// What a registered route answers with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDefinition {
    pub status: StatusCode,
    pub body: Bytes,
    /// Answer with a status drawn from the fault injector and no body
    pub inject_fault: bool,
}

impl RouteDefinition {
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        RouteDefinition {
            status,
            body: body.into(),
            inject_fault: false,
        }
    }
}

/// Why a single registration entry was refused
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("missing path")]
    MissingPath,
    #[error("invalid path '{0}': must start with '/' and contain no query or fragment")]
    InvalidPath(String),
    #[error("invalid method '{0}'")]
    InvalidMethod(String),
    #[error("invalid status code {0}: must be between 100 and 599")]
    InvalidStatusCode(u16),
    #[error("malformed entry: {0}")]
    Malformed(String),
}

/// The registration payload was not a list of entries at all
#[derive(Debug, thiserror::Error)]
#[error("expected a JSON array of routes or a single route object, got {0}")]
pub struct BatchError(&'static str);

/// A refused entry, reported by its position in the submitted batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub index: usize,
    pub path: Option<String>,
    pub method: Option<String>,
    pub error: RouteError,
}

/// Outcome of applying a batch to the registry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsertReport {
    pub inserted: usize,
    pub rejected: Vec<Rejection>,
}

impl RouteSpec {
    /// Validate the entry and turn it into a registry key and definition.
    ///
    /// Methods are upper-cased before parsing so `get` and `GET` name the
    /// same route. Paths are stored percent-decoded, so `/a b` and `/a%20b`
    /// name the same route.
    pub fn validate(self) -> Result<(RouteKey, RouteDefinition), RouteError> {
        let path = match self.path {
            Some(path) if !path.is_empty() => path,
            _ => return Err(RouteError::MissingPath),
        };
        if !path.starts_with('/') || path.contains(['?', '#']) {
            return Err(RouteError::InvalidPath(path));
        }
        let path = decode_path(&path);

        let method = Method::from_bytes(self.method.trim().to_ascii_uppercase().as_bytes())
            .map_err(|_| RouteError::InvalidMethod(self.method.clone()))?;

        if !(100..=599).contains(&self.code) {
            return Err(RouteError::InvalidStatusCode(self.code));
        }
        let status =
            StatusCode::from_u16(self.code).map_err(|_| RouteError::InvalidStatusCode(self.code))?;

        Ok((
            RouteKey { method, path },
            RouteDefinition {
                inject_fault: self.error,
                ..RouteDefinition::new(status, self.response)
            },
        ))
    }
}

/// Percent-decode a path for use as a registry key. Paths that do not
/// decode to UTF-8 are kept as given.
pub fn decode_path(path: &str) -> String {
    urlencoding::decode(path)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// A validated registration batch: accepted entries ready for insertion plus
/// the entries that were refused.
#[derive(Debug, Default)]
pub struct RouteBatch {
    accepted: Vec<(RouteKey, RouteDefinition)>,
    rejected: Vec<Rejection>,
}

impl RouteBatch {
    /// Build a batch from a parsed JSON payload.
    ///
    /// An array is treated as a list of entries and a lone object as a batch
    /// of one. Entries that do not deserialize into a [`RouteSpec`] are
    /// rejected individually; the rest of the batch is unaffected.
    pub fn from_json(payload: JsonValue) -> Result<Self, BatchError> {
        let entries = match payload {
            JsonValue::Array(entries) => entries,
            JsonValue::Object(_) => vec![payload],
            JsonValue::Null => return Err(BatchError("null")),
            JsonValue::Bool(_) => return Err(BatchError("a boolean")),
            JsonValue::Number(_) => return Err(BatchError("a number")),
            JsonValue::String(_) => return Err(BatchError("a string")),
        };

        let mut batch = RouteBatch::default();
        for (index, entry) in entries.into_iter().enumerate() {
            let path = entry.get("path").and_then(JsonValue::as_str).map(str::to_string);
            let method = entry.get("method").and_then(JsonValue::as_str).map(str::to_string);
            match serde_json::from_value::<RouteSpec>(entry) {
                Ok(spec) => batch.push(index, spec),
                Err(err) => batch.rejected.push(Rejection {
                    index,
                    path,
                    method,
                    error: RouteError::Malformed(err.to_string()),
                }),
            }
        }
        Ok(batch)
    }

    /// Build a batch from already-deserialized entries.
    pub fn from_specs(specs: impl IntoIterator<Item = RouteSpec>) -> Self {
        let mut batch = RouteBatch::default();
        for (index, spec) in specs.into_iter().enumerate() {
            batch.push(index, spec);
        }
        batch
    }

    fn push(&mut self, index: usize, spec: RouteSpec) {
        let path = spec.path.clone();
        let method = spec.method.clone();
        match spec.validate() {
            Ok(entry) => self.accepted.push(entry),
            Err(error) => self.rejected.push(Rejection {
                index,
                path,
                method: Some(method),
                error,
            }),
        }
    }

    pub fn accepted(&self) -> &[(RouteKey, RouteDefinition)] {
        &self.accepted
    }

    pub fn rejected(&self) -> &[Rejection] {
        &self.rejected
    }
}

/// In-memory table of dynamically registered routes.
///
/// Readers take a shared lock for the duration of one hash lookup and clone
/// the definition out (the body is a reference-counted [`Bytes`]), so a
/// reader sees either the old or the new definition for a key, never a mix.
#[derive(Debug, Default)]
pub struct RouteRegistry {
    routes: RwLock<HashMap<RouteKey, RouteDefinition>>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace each entry. Returns the number of entries written.
    pub fn insert<I>(&self, entries: I) -> usize
    where
        I: IntoIterator<Item = (RouteKey, RouteDefinition)>,
    {
        let entries: Vec<_> = entries.into_iter().collect();
        let count = entries.len();

        let mut routes = self.routes.write();
        for (key, definition) in entries {
            routes.insert(key, definition);
        }
        count
    }

    /// Insert the accepted part of a batch and report on the whole of it.
    pub fn apply(&self, batch: RouteBatch) -> InsertReport {
        for (key, definition) in &batch.accepted {
            tracing::info!(
                "Registering route: {} {} -> {}",
                key.method,
                key.path,
                definition.status.as_u16()
            );
        }
        for rejection in &batch.rejected {
            tracing::warn!(
                "Rejected route entry #{}: {}",
                rejection.index,
                rejection.error
            );
        }

        let inserted = self.insert(batch.accepted);
        InsertReport {
            inserted,
            rejected: batch.rejected,
        }
    }

    /// Exact-match lookup on method and path.
    pub fn lookup(&self, method: &Method, path: &str) -> Option<RouteDefinition> {
        let key = RouteKey::new(method.clone(), path);
        self.routes.read().get(&key).cloned()
    }

    /// All registered routes ordered by path, then method.
    pub fn snapshot(&self) -> Vec<(RouteKey, RouteDefinition)> {
        let mut entries: Vec<_> = self
            .routes
            .read()
            .iter()
            .map(|(key, definition)| (key.clone(), definition.clone()))
            .collect();
        entries.sort_by(|(a, _), (b, _)| {
            a.path
                .cmp(&b.path)
                .then_with(|| a.method.as_str().cmp(b.method.as_str()))
        });
        entries
    }

    pub fn len(&self) -> usize {
        self.routes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.read().is_empty()
    }
}
