//! Users module: registration, login and session tokens.
//!
//! # Routes (under `/api/users`)
//!
//! - `GET /test`: liveness probe for the module
//! - `POST /register`: create an account
//! - `POST /login`: exchange credentials for a bearer token
//! - `GET /current`: the caller's identity (private)
//!
//! [`AuthService`] also implements [`TokenVerifier`], which the server
//! hands to every module for guarding private routes.

pub mod api;
pub mod model;
pub mod service;

use std::sync::Arc;

use axum::Router;

use devconnector_core::{Module, SharedVerifier, TokenVerifier};
use devconnector_kv::KVStore;

pub use crate::service::{AuthConfig, AuthError, AuthService};

/// Users module implementing the Module trait.
pub struct AuthModule {
    service: Arc<AuthService>,
}

impl AuthModule {
    pub fn new(kv: Arc<dyn KVStore>, config: AuthConfig) -> Self {
        Self {
            service: AuthService::new(kv, config),
        }
    }

    /// Get a reference to the underlying AuthService.
    pub fn service(&self) -> &Arc<AuthService> {
        &self.service
    }

    /// The token verifier used by private routes of all modules.
    pub fn verifier(&self) -> SharedVerifier {
        let verifier: Arc<dyn TokenVerifier> = self.service.clone();
        verifier
    }
}

impl Module for AuthModule {
    fn name(&self) -> &str {
        "users"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone(), self.verifier())
    }
}
