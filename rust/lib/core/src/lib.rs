pub mod auth;
pub mod config;
pub mod error;
pub mod json;
pub mod module;
pub mod types;

pub use auth::{require_auth, CurrentUser, SharedVerifier, TokenVerifier};
pub use config::ServiceConfig;
pub use error::{FieldErrors, ServiceError};
pub use json::JsonBody;
pub use module::Module;
pub use types::{new_id, now_rfc3339};
