use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use devconnector_core::{CurrentUser, JsonBody, ServiceError};
use devconnector_validate::{LoginInput, RegisterInput};

use crate::api::AppState;
use crate::model::{PublicUser, TokenResponse};

pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/test", get(test))
        .route("/register", post(register))
        .route("/login", post(login))
}

pub fn private_routes() -> Router<AppState> {
    Router::new().route("/current", get(current))
}

async fn test() -> Json<Value> {
    Json(json!({"msg": "Users works"}))
}

/// Run password hashing off the async workers.
async fn blocking<R, F>(f: F) -> Result<R, ServiceError>
where
    F: FnOnce() -> Result<R, ServiceError> + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ServiceError::Internal(format!("password task failed: {}", e)))?
}

async fn register(
    State(svc): State<AppState>,
    JsonBody(input): JsonBody<RegisterInput>,
) -> Result<Json<PublicUser>, ServiceError> {
    let user = blocking(move || svc.register(input).map_err(ServiceError::from)).await?;
    Ok(Json(user))
}

async fn login(
    State(svc): State<AppState>,
    JsonBody(input): JsonBody<LoginInput>,
) -> Result<Json<TokenResponse>, ServiceError> {
    let token = blocking(move || svc.login(input).map_err(ServiceError::from)).await?;
    Ok(Json(token))
}

/// GET /api/users/current: id, name and email of the caller.
async fn current(
    State(svc): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Value>, ServiceError> {
    let user = svc.get_user(&user.id)?;
    Ok(Json(json!({
        "id": user.id,
        "name": user.name,
        "email": user.email,
    })))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use devconnector_core::Module;
    use devconnector_kv::MemoryStore;
    use tower::ServiceExt;

    use super::*;
    use crate::{AuthConfig, AuthModule};

    fn app() -> axum::Router {
        AuthModule::new(Arc::new(MemoryStore::new()), AuthConfig::default()).routes()
    }

    async fn call(
        app: &axum::Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(t) = token {
            req = req.header("authorization", t);
        }
        let req = match body {
            Some(b) => req
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&b).unwrap()))
                .unwrap(),
            None => req.body(Body::empty()).unwrap(),
        };
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    fn alice() -> Value {
        json!({
            "name": "Alice",
            "email": "alice@example.com",
            "password": "secret1",
            "password2": "secret1",
        })
    }

    #[tokio::test]
    async fn test_route() {
        let app = app();
        let (status, body) = call(&app, "GET", "/test", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"msg": "Users works"}));
    }

    #[tokio::test]
    async fn register_login_current() {
        let app = app();

        let (status, user) = call(&app, "POST", "/register", Some(alice()), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(user["email"], "alice@example.com");
        assert!(user.get("password").is_none());

        let (status, login) = call(
            &app,
            "POST",
            "/login",
            Some(json!({"email": "alice@example.com", "password": "secret1"})),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(login["success"], true);
        let token = login["token"].as_str().unwrap().to_string();
        assert!(token.starts_with("Bearer "));

        let (status, me) = call(&app, "GET", "/current", None, Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me, json!({"id": user["id"], "name": "Alice", "email": "alice@example.com"}));
    }

    #[tokio::test]
    async fn register_duplicate_email_is_400() {
        let app = app();
        call(&app, "POST", "/register", Some(alice()), None).await;
        let (status, body) = call(&app, "POST", "/register", Some(alice()), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"email": "Email already exists"}));
    }

    #[tokio::test]
    async fn register_validation_errors_are_field_map() {
        let app = app();
        let (status, body) = call(
            &app,
            "POST",
            "/register",
            Some(json!({"name": "A", "email": "nope"})),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["name"], "Name must be between 2 and 30 characters");
        assert_eq!(body["email"], "Email is invalid");
        assert_eq!(body["password"], "Password field is required");
    }

    #[tokio::test]
    async fn malformed_login_body_is_field_map() {
        let app = app();
        let req = Request::post("/login")
            .header("content-type", "application/json")
            .body(Body::from("{\"email\": "))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"body": "Request body is not valid JSON"}));
    }

    #[tokio::test]
    async fn login_failures() {
        let app = app();
        call(&app, "POST", "/register", Some(alice()), None).await;

        let (status, body) = call(
            &app,
            "POST",
            "/login",
            Some(json!({"email": "bob@example.com", "password": "secret1"})),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"email": "User not found"}));

        let (status, body) = call(
            &app,
            "POST",
            "/login",
            Some(json!({"email": "alice@example.com", "password": "wrong"})),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"password": "Password incorrect"}));
    }

    #[tokio::test]
    async fn current_requires_token() {
        let app = app();
        let (status, body) = call(&app, "GET", "/current", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"unauthorized": "Unauthorized"}));

        let (status, _) = call(&app, "GET", "/current", None, Some("Bearer garbage")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
