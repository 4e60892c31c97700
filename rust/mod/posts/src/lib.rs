//! Posts, likes and comments.

pub mod api;
pub mod model;
pub mod service;

use std::sync::Arc;

use axum::Router;

use devconnector_core::{Module, SharedVerifier};
use devconnector_kv::KVStore;

pub use crate::service::PostService;

pub struct PostsModule {
    service: Arc<PostService>,
    verifier: SharedVerifier,
}

impl PostsModule {
    pub fn new(kv: Arc<dyn KVStore>, verifier: SharedVerifier) -> Self {
        Self {
            service: PostService::new(kv),
            verifier,
        }
    }

    pub fn service(&self) -> &Arc<PostService> {
        &self.service
    }
}

impl Module for PostsModule {
    fn name(&self) -> &str {
        "posts"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone(), self.verifier.clone())
    }
}
