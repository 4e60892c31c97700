pub mod session;
pub mod user;

use std::sync::Arc;

use thiserror::Error;

use devconnector_core::{FieldErrors, ServiceError};
use devconnector_kv::KVStore;
use devconnector_store::DocOps;

use crate::model::User;

/// Auth service error type.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation: {0}")]
    Validation(FieldErrors),

    #[error("email already exists")]
    EmailExists,

    #[error("user not found")]
    UserNotFound,

    #[error("password incorrect")]
    PasswordIncorrect,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("internal: {0}")]
    Internal(String),
}

impl From<AuthError> for ServiceError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(errors) => ServiceError::BadRequest(errors),
            AuthError::EmailExists => ServiceError::bad_request("email", "Email already exists"),
            AuthError::UserNotFound => ServiceError::not_found("email", "User not found"),
            AuthError::PasswordIncorrect => {
                ServiceError::bad_request("password", "Password incorrect")
            }
            AuthError::InvalidToken(_) => devconnector_core::auth::unauthorized(),
            AuthError::Service(e) => e,
            AuthError::Internal(m) => ServiceError::Internal(m),
        }
    }
}

/// Configuration for the auth service.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret for signing session tokens.
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    pub token_ttl: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "devconnector-dev-secret-change-me".to_string(),
            token_ttl: 3600,
        }
    }
}

/// The auth service. Owns the users collection and the signing config.
pub struct AuthService {
    pub(crate) users: DocOps<User>,
    pub(crate) config: AuthConfig,
}

impl AuthService {
    pub fn new(kv: Arc<dyn KVStore>, config: AuthConfig) -> Arc<Self> {
        Arc::new(Self {
            users: DocOps::new(kv),
            config,
        })
    }
}
