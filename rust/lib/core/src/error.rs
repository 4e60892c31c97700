use std::collections::BTreeMap;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Error codes ─────────────────────────────────────────────────────
//
// Stable identifiers used in logs. The wire format is the field map,
// not these codes.

pub mod error_code {
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const UNAUTHENTICATED: &str = "UNAUTHENTICATED";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
    pub const INTERNAL: &str = "INTERNAL";
}

// ── FieldErrors ─────────────────────────────────────────────────────

/// Field-keyed error messages, serialized as a flat JSON object:
///
/// ```json
/// {"handle": "That handle already exists"}
/// ```
///
/// Keys are ordered so responses are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// A map holding exactly one entry.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(field, message);
        errors
    }

    /// Record a message for a field. A later message for the same field
    /// replaces the earlier one.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

impl FromIterator<(String, String)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ── ServiceError ────────────────────────────────────────────────────

/// Unified service error type used across all modules.
///
/// Client-caused variants carry a [`FieldErrors`] map which becomes the
/// response body verbatim. Server faults carry a message and are reported
/// as `{"internal": "..."}`.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Input failed validation or conflicts with existing data. HTTP 400.
    #[error("{0}")]
    BadRequest(FieldErrors),

    /// Requested document does not exist. HTTP 404.
    #[error("{0}")]
    NotFound(FieldErrors),

    /// Missing session, or the caller does not own the document. HTTP 401.
    #[error("{0}")]
    Unauthorized(FieldErrors),

    /// Storage backend failure. HTTP 500.
    #[error("{0}")]
    Storage(String),

    /// Unexpected internal error. HTTP 500.
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    pub fn bad_request(field: impl Into<String>, message: impl Into<String>) -> Self {
        ServiceError::BadRequest(FieldErrors::single(field, message))
    }

    pub fn not_found(field: impl Into<String>, message: impl Into<String>) -> Self {
        ServiceError::NotFound(FieldErrors::single(field, message))
    }

    pub fn unauthorized(field: impl Into<String>, message: impl Into<String>) -> Self {
        ServiceError::Unauthorized(FieldErrors::single(field, message))
    }

    /// Stable, machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::BadRequest(_) => error_code::BAD_REQUEST,
            ServiceError::NotFound(_) => error_code::NOT_FOUND,
            ServiceError::Unauthorized(_) => error_code::UNAUTHENTICATED,
            ServiceError::Storage(_) => error_code::STORAGE_ERROR,
            ServiceError::Internal(_) => error_code::INTERNAL,
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServiceError::Storage(_) | ServiceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The response body for this error.
    pub fn fields(&self) -> FieldErrors {
        match self {
            ServiceError::BadRequest(f)
            | ServiceError::NotFound(f)
            | ServiceError::Unauthorized(f) => f.clone(),
            ServiceError::Storage(m) | ServiceError::Internal(m) => {
                FieldErrors::single("internal", m.clone())
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        } else {
            tracing::debug!(code = self.error_code(), "{}", self);
        }
        (status, axum::Json(self.fields())).into_response()
    }
}
