//! Developer profiles with experience and education history.
//!
//! Public routes read profiles by handle or user id. Private routes act on
//! the caller's own profile, which is keyed by their user id.

pub mod api;
pub mod model;
pub mod service;

use std::sync::Arc;

use axum::Router;

use devconnector_auth::AuthService;
use devconnector_core::{Module, SharedVerifier};
use devconnector_kv::KVStore;

pub use crate::service::ProfileService;

pub struct ProfileModule {
    service: Arc<ProfileService>,
    verifier: SharedVerifier,
}

impl ProfileModule {
    /// `auth` is used to show owner names and to delete accounts.
    pub fn new(kv: Arc<dyn KVStore>, auth: Arc<AuthService>, verifier: SharedVerifier) -> Self {
        Self {
            service: ProfileService::new(kv, auth),
            verifier,
        }
    }

    pub fn service(&self) -> &Arc<ProfileService> {
        &self.service
    }
}

impl Module for ProfileModule {
    fn name(&self) -> &str {
        "profile"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone(), self.verifier.clone())
    }
}
