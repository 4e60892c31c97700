mod users;

use std::sync::Arc;

use axum::Router;

use devconnector_core::{require_auth, SharedVerifier};

use crate::service::AuthService;

/// Shared application state.
pub type AppState = Arc<AuthService>;

/// Build the users API router.
///
/// All routes are relative. The server nests them under `/api/users`.
pub fn build_router(svc: Arc<AuthService>, verifier: SharedVerifier) -> Router {
    let private = users::private_routes()
        .route_layer(axum::middleware::from_fn_with_state(verifier, require_auth));

    users::public_routes()
        .merge(private)
        .with_state(svc)
}
