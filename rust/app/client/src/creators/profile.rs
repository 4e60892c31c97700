use devconnector_validate::{EducationInput, ExperienceInput, ProfileInput};
use serde_json::Value;

use crate::action::Action;
use crate::api::ApiClient;
use crate::model::Profile;
use crate::store::Store;

/// Load the caller's profile. A user without one ends with `GetProfile(None)`.
pub async fn get_current_profile(api: &ApiClient, store: &Store) {
    store.dispatch(Action::ProfileLoading);
    let profile = api.get::<Profile>("/api/profile").await.ok();
    store.dispatch(Action::GetProfile(profile));
}

pub async fn get_profiles(api: &ApiClient, store: &Store) {
    store.dispatch(Action::ProfileLoading);
    let profiles = api.get::<Vec<Profile>>("/api/profile/all").await.ok();
    store.dispatch(Action::GetProfiles(profiles));
}

pub async fn get_profile_by_handle(api: &ApiClient, store: &Store, handle: &str) {
    store.dispatch(Action::ProfileLoading);
    let profile = api
        .get::<Profile>(&format!("/api/profile/handle/{}", handle))
        .await
        .ok();
    store.dispatch(Action::GetProfile(profile));
}

/// Dispatch the updated profile, or the server's errors.
fn settle(store: &Store, result: Result<Profile, crate::api::ApiError>) -> bool {
    match result {
        Ok(profile) => {
            store.dispatch(Action::ClearErrors);
            store.dispatch(Action::GetProfile(Some(profile)));
            true
        }
        Err(e) => {
            store.dispatch(Action::GetErrors(e.field_errors()));
            false
        }
    }
}

/// Create or edit the caller's profile.
pub async fn create_profile(api: &ApiClient, store: &Store, input: &ProfileInput) -> bool {
    settle(store, api.post("/api/profile", input).await)
}

pub async fn add_experience(api: &ApiClient, store: &Store, input: &ExperienceInput) -> bool {
    settle(store, api.post("/api/profile/experience", input).await)
}

pub async fn add_education(api: &ApiClient, store: &Store, input: &EducationInput) -> bool {
    settle(store, api.post("/api/profile/education", input).await)
}

pub async fn delete_experience(api: &ApiClient, store: &Store, exp_id: &str) -> bool {
    settle(store, api.delete(&format!("/api/profile/experience/{}", exp_id)).await)
}

pub async fn delete_education(api: &ApiClient, store: &Store, edu_id: &str) -> bool {
    settle(store, api.delete(&format!("/api/profile/education/{}", edu_id)).await)
}

/// Delete the caller's profile and account, then sign out locally.
pub async fn delete_account(api: &ApiClient, store: &Store) -> bool {
    match api.delete::<Value>("/api/profile").await {
        Ok(_) => {
            api.set_auth_token(None);
            store.dispatch(Action::ClearCurrentProfile);
            store.dispatch(Action::SetCurrentUser(None));
            true
        }
        Err(e) => {
            store.dispatch(Action::GetErrors(e.field_errors()));
            false
        }
    }
}
