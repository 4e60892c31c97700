//! Route registration: module routers under `/api/{name}` plus system endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::Method;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use devconnector_auth::{AuthConfig, AuthModule};
use devconnector_core::Module;
use devconnector_kv::KVStore;
use devconnector_posts::PostsModule;
use devconnector_profile::ProfileModule;

/// Construct every module over one store.
///
/// The users module owns session verification, so the others receive its
/// verifier.
pub fn build_modules(kv: Arc<dyn KVStore>, auth: AuthConfig) -> Vec<Box<dyn Module>> {
    let users = AuthModule::new(kv.clone(), auth);
    let verifier = users.verifier();
    let profile = ProfileModule::new(kv.clone(), users.service().clone(), verifier.clone());
    let posts = PostsModule::new(kv, verifier);
    vec![Box::new(users), Box::new(profile), Box::new(posts)]
}

/// Build the complete router.
pub fn build_router(modules: &[Box<dyn Module>]) -> Router {
    let mut app = Router::new()
        .route("/health", get(health))
        .route("/version", get(version));

    for module in modules {
        tracing::info!(module = module.name(), "mounting routes");
        app = app.nest(&format!("/api/{}", module.name()), module.routes());
    }

    app.layer(TraceLayer::new_for_http()).layer(cors())
}

/// Modules and router in one step.
pub fn build_app(kv: Arc<dyn KVStore>, auth: AuthConfig) -> Router {
    build_router(&build_modules(kv, auth))
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60))
}

async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
    }))
}

async fn version() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": "devconnectord",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use devconnector_kv::MemoryStore;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        build_app(Arc::new(MemoryStore::new()), AuthConfig::default())
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
        let mut req = Request::post(uri).header("content-type", "application/json");
        if let Some(t) = token {
            req = req.header("authorization", t);
        }
        req.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn system_endpoints() {
        let app = app();
        let (status, body) = send(&app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));

        let (status, body) = send(&app, get("/version")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "devconnectord");
    }

    #[tokio::test]
    async fn every_module_is_mounted() {
        let app = app();
        for (uri, msg) in [
            ("/api/users/test", "Users works"),
            ("/api/profile/test", "Profile works"),
            ("/api/posts/test", "Posts works"),
        ] {
            let (status, body) = send(&app, get(uri)).await;
            assert_eq!(status, StatusCode::OK, "{}", uri);
            assert_eq!(body["msg"], msg);
        }
    }

    #[tokio::test]
    async fn login_token_opens_private_routes() {
        let app = app();
        let (status, _) = send(
            &app,
            post_json(
                "/api/users/register",
                json!({"name": "Alice", "email": "alice@example.com", "password": "secret1", "password2": "secret1"}),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &app,
            post_json("/api/users/login", json!({"email": "alice@example.com", "password": "secret1"}), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let token = body["token"].as_str().unwrap().to_string();

        let (status, post) = send(
            &app,
            post_json("/api/posts", json!({"text": "First post on the network"}), Some(&token)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(post["name"], "Alice");

        let (status, _) = send(
            &app,
            post_json("/api/posts", json!({"text": "First post on the network"}), Some("Bearer forged")),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn cors_preflight_allows_authorization() {
        let app = app();
        let req = Request::builder()
            .method("OPTIONS")
            .uri("/api/posts")
            .header("origin", "http://localhost:3000")
            .header("access-control-request-method", "POST")
            .header("access-control-request-headers", "authorization")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["access-control-allow-origin"], "*");
    }
}
