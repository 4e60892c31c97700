//! Request authentication shared by all resource modules.
//!
//! Modules never depend on the concrete token scheme. They only know the
//! [`TokenVerifier`] trait; the implementation is injected at startup.
//! [`require_auth`] guards private routes and [`CurrentUser`] hands the
//! verified identity to handlers.

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use serde::{Deserialize, Serialize};

use crate::ServiceError;

/// Identity of the caller, taken from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar: String,
}

/// Pluggable token verifier.
pub trait TokenVerifier: Send + Sync + 'static {
    /// Verify a raw token (without the `Bearer ` prefix).
    fn verify(&self, token: &str) -> Result<CurrentUser, ServiceError>;
}

pub type SharedVerifier = Arc<dyn TokenVerifier>;

/// The error every private route returns for a missing or bad session.
pub fn unauthorized() -> ServiceError {
    ServiceError::unauthorized("unauthorized", "Unauthorized")
}

/// Extract the token from `Authorization: Bearer <token>`.
pub fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Middleware for private routes.
///
/// Verifies the bearer token and stores [`CurrentUser`] in the request
/// extensions. Short-circuits with 401 otherwise.
pub async fn require_auth(
    State(verifier): State<SharedVerifier>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    let token = extract_bearer(request.headers()).ok_or_else(unauthorized)?;

    let user = verifier.verify(token).map_err(|e| {
        tracing::debug!("rejected bearer token: {}", e);
        unauthorized()
    })?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(unauthorized)
    }
}
