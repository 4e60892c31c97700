use devconnector_core::FieldErrors;

use crate::model::{AuthUser, Post, Profile};

/// Every state transition the client knows about.
///
/// `None` payloads mean "nothing loaded": a logged-out user, or a fetch
/// that failed.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetCurrentUser(Option<AuthUser>),
    GetErrors(FieldErrors),
    ClearErrors,

    ProfileLoading,
    GetProfile(Option<Profile>),
    GetProfiles(Option<Vec<Profile>>),
    ClearCurrentProfile,

    PostLoading,
    AddPost(Post),
    GetPosts(Option<Vec<Post>>),
    GetPost(Option<Post>),
    /// Post id.
    DeletePost(String),
}
