//! Action creators.
//!
//! Each creator performs one user intent against the API and always ends
//! in a dispatch: a "loaded" action on success, `GetErrors` (or an empty
//! payload for plain fetches) on failure. Creators that a UI would follow
//! with navigation return whether the request succeeded.

pub mod auth;
pub mod post;
pub mod profile;

use crate::action::Action;

pub fn clear_errors() -> Action {
    Action::ClearErrors
}

pub fn set_profile_loading() -> Action {
    Action::ProfileLoading
}

pub fn clear_current_profile() -> Action {
    Action::ClearCurrentProfile
}

pub fn set_post_loading() -> Action {
    Action::PostLoading
}
