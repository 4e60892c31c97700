use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use devconnector_core::{require_auth, CurrentUser, JsonBody, ServiceError, SharedVerifier};
use devconnector_validate::PostInput;

use crate::model::Post;
use crate::service::PostService;

pub type AppState = Arc<PostService>;

/// Build the posts API router. The server nests it under `/api/posts`.
pub fn build_router(svc: Arc<PostService>, verifier: SharedVerifier) -> Router {
    let public = Router::new()
        .route("/test", get(test))
        .route("/", get(list))
        .route("/{id}", get(get_post));

    let private = Router::new()
        .route("/", post(create))
        .route("/{id}", delete(delete_post))
        .route("/like/{id}", post(like))
        .route("/unlike/{id}", delete(unlike))
        .route("/comment/{id}", post(comment))
        .route("/comment/{id}/{comment_id}", delete(delete_comment))
        .route_layer(axum::middleware::from_fn_with_state(verifier, require_auth));

    public.merge(private).with_state(svc)
}

async fn test() -> Json<Value> {
    Json(json!({"msg": "Posts works"}))
}

async fn list(State(svc): State<AppState>) -> Result<Json<Vec<Post>>, ServiceError> {
    Ok(Json(svc.list()?))
}

async fn get_post(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Post>, ServiceError> {
    Ok(Json(svc.get(&id)?))
}

async fn create(
    State(svc): State<AppState>,
    user: CurrentUser,
    JsonBody(input): JsonBody<PostInput>,
) -> Result<Json<Post>, ServiceError> {
    Ok(Json(svc.create(&user, input)?))
}

async fn delete_post(
    State(svc): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ServiceError> {
    svc.delete(&user, &id)?;
    Ok(Json(json!({"success": true})))
}

async fn like(
    State(svc): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Post>, ServiceError> {
    Ok(Json(svc.like(&user, &id)?))
}

async fn unlike(
    State(svc): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Post>, ServiceError> {
    Ok(Json(svc.unlike(&user, &id)?))
}

async fn comment(
    State(svc): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<PostInput>,
) -> Result<Json<Post>, ServiceError> {
    Ok(Json(svc.comment(&user, &id, input)?))
}

async fn delete_comment(
    State(svc): State<AppState>,
    Path((id, comment_id)): Path<(String, String)>,
) -> Result<Json<Post>, ServiceError> {
    Ok(Json(svc.delete_comment(&id, &comment_id)?))
}
