use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use devconnector_core::{require_auth, CurrentUser, JsonBody, ServiceError, SharedVerifier};
use devconnector_validate::{EducationInput, ExperienceInput, ProfileInput};

use crate::model::ProfileView;
use crate::service::ProfileService;

pub type AppState = Arc<ProfileService>;

/// Build the profile API router. The server nests it under `/api/profile`.
pub fn build_router(svc: Arc<ProfileService>, verifier: SharedVerifier) -> Router {
    let public = Router::new()
        .route("/test", get(test))
        .route("/all", get(all))
        .route("/handle/{handle}", get(by_handle))
        .route("/user/{user_id}", get(by_user));

    let private = Router::new()
        .route("/", get(current).post(upsert).delete(delete_account))
        .route("/experience", post(add_experience))
        .route("/education", post(add_education))
        .route("/experience/{exp_id}", delete(delete_experience))
        .route("/education/{edu_id}", delete(delete_education))
        .route_layer(axum::middleware::from_fn_with_state(verifier, require_auth));

    public.merge(private).with_state(svc)
}

async fn test() -> Json<Value> {
    Json(json!({"msg": "Profile works"}))
}

async fn all(State(svc): State<AppState>) -> Result<Json<Vec<ProfileView>>, ServiceError> {
    Ok(Json(svc.all()?))
}

async fn by_handle(
    State(svc): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<ProfileView>, ServiceError> {
    Ok(Json(svc.by_handle(&handle)?))
}

async fn by_user(
    State(svc): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ProfileView>, ServiceError> {
    Ok(Json(svc.by_user(&user_id)?))
}

async fn current(
    State(svc): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ProfileView>, ServiceError> {
    Ok(Json(svc.current(&user)?))
}

async fn upsert(
    State(svc): State<AppState>,
    user: CurrentUser,
    JsonBody(input): JsonBody<ProfileInput>,
) -> Result<Json<ProfileView>, ServiceError> {
    Ok(Json(svc.upsert(&user, input)?))
}

async fn add_experience(
    State(svc): State<AppState>,
    user: CurrentUser,
    JsonBody(input): JsonBody<ExperienceInput>,
) -> Result<Json<ProfileView>, ServiceError> {
    Ok(Json(svc.add_experience(&user, input)?))
}

async fn add_education(
    State(svc): State<AppState>,
    user: CurrentUser,
    JsonBody(input): JsonBody<EducationInput>,
) -> Result<Json<ProfileView>, ServiceError> {
    Ok(Json(svc.add_education(&user, input)?))
}

async fn delete_experience(
    State(svc): State<AppState>,
    user: CurrentUser,
    Path(exp_id): Path<String>,
) -> Result<Json<ProfileView>, ServiceError> {
    Ok(Json(svc.delete_experience(&user, &exp_id)?))
}

async fn delete_education(
    State(svc): State<AppState>,
    user: CurrentUser,
    Path(edu_id): Path<String>,
) -> Result<Json<ProfileView>, ServiceError> {
    Ok(Json(svc.delete_education(&user, &edu_id)?))
}

async fn delete_account(
    State(svc): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Value>, ServiceError> {
    svc.delete_account(&user)?;
    Ok(Json(json!({"success": true})))
}
