//! State slices and the pure reducers that update them.
//!
//! Each reducer takes the previous slice by value and returns the next one.
//! Actions a slice does not handle leave it unchanged.

use devconnector_core::FieldErrors;

use crate::action::Action;
use crate::model::{AuthUser, Post, Profile};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub is_authenticated: bool,
    pub user: Option<AuthUser>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileState {
    /// The profile being viewed: the caller's own, or one fetched by handle.
    pub profile: Option<Profile>,
    pub profiles: Option<Vec<Profile>>,
    pub loading: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostState {
    pub posts: Vec<Post>,
    pub post: Option<Post>,
    pub loading: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootState {
    pub auth: AuthState,
    pub profile: ProfileState,
    pub post: PostState,
    /// Field errors from the last failed request.
    pub errors: FieldErrors,
}

pub fn auth_reducer(state: AuthState, action: &Action) -> AuthState {
    match action {
        Action::SetCurrentUser(user) => AuthState {
            is_authenticated: user.is_some(),
            user: user.clone(),
        },
        _ => state,
    }
}

pub fn errors_reducer(state: FieldErrors, action: &Action) -> FieldErrors {
    match action {
        Action::GetErrors(errors) => errors.clone(),
        Action::ClearErrors => FieldErrors::new(),
        _ => state,
    }
}

pub fn profile_reducer(state: ProfileState, action: &Action) -> ProfileState {
    match action {
        Action::ProfileLoading => ProfileState {
            loading: true,
            ..state
        },
        Action::GetProfile(profile) => ProfileState {
            profile: profile.clone(),
            loading: false,
            ..state
        },
        Action::GetProfiles(profiles) => ProfileState {
            profiles: profiles.clone(),
            loading: false,
            ..state
        },
        Action::ClearCurrentProfile => ProfileState {
            profile: None,
            ..state
        },
        _ => state,
    }
}

pub fn post_reducer(state: PostState, action: &Action) -> PostState {
    match action {
        Action::PostLoading => PostState {
            loading: true,
            ..state
        },
        Action::AddPost(post) => {
            let mut posts = Vec::with_capacity(state.posts.len() + 1);
            posts.push(post.clone());
            posts.extend(state.posts);
            PostState { posts, ..state }
        }
        Action::GetPosts(posts) => PostState {
            posts: posts.clone().unwrap_or_default(),
            loading: false,
            ..state
        },
        Action::GetPost(post) => PostState {
            post: post.clone(),
            loading: false,
            ..state
        },
        Action::DeletePost(id) => {
            let mut state = state;
            state.posts.retain(|p| &p.id != id);
            state
        }
        _ => state,
    }
}

/// Route an action through every slice.
pub fn root_reducer(state: RootState, action: &Action) -> RootState {
    RootState {
        auth: auth_reducer(state.auth, action),
        profile: profile_reducer(state.profile, action),
        post: post_reducer(state.post, action),
        errors: errors_reducer(state.errors, action),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: &str) -> Post {
        Post {
            id: id.into(),
            text: format!("post {}", id),
            ..Default::default()
        }
    }

    fn user() -> AuthUser {
        AuthUser {
            id: "u1".into(),
            name: "Alice".into(),
            avatar: String::new(),
            iat: 0,
            exp: 3600,
        }
    }

    #[test]
    fn set_current_user_toggles_authentication() {
        let state = auth_reducer(AuthState::default(), &Action::SetCurrentUser(Some(user())));
        assert!(state.is_authenticated);
        assert_eq!(state.user.as_ref().map(|u| u.name.as_str()), Some("Alice"));

        let state = auth_reducer(state, &Action::SetCurrentUser(None));
        assert_eq!(state, AuthState::default());
    }

    #[test]
    fn errors_replace_then_clear() {
        let errors = FieldErrors::single("email", "Email is invalid");
        let state = errors_reducer(FieldErrors::new(), &Action::GetErrors(errors.clone()));
        assert_eq!(state, errors);
        assert!(errors_reducer(state, &Action::ClearErrors).is_empty());
    }

    #[test]
    fn profile_loading_cycle() {
        let state = profile_reducer(ProfileState::default(), &Action::ProfileLoading);
        assert!(state.loading);

        let profile = Profile {
            handle: "alice".into(),
            ..Default::default()
        };
        let state = profile_reducer(state, &Action::GetProfile(Some(profile.clone())));
        assert!(!state.loading);
        assert_eq!(state.profile, Some(profile));

        let state = profile_reducer(state, &Action::GetProfiles(Some(vec![])));
        assert_eq!(state.profiles, Some(vec![]));
        assert!(state.profile.is_some());

        let state = profile_reducer(state, &Action::ClearCurrentProfile);
        assert!(state.profile.is_none());
        assert!(state.profiles.is_some());
    }

    #[test]
    fn add_post_prepends_and_delete_removes() {
        let state = post_reducer(PostState::default(), &Action::GetPosts(Some(vec![post("a")])));
        let state = post_reducer(state, &Action::AddPost(post("b")));
        let ids: Vec<&str> = state.posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);

        let state = post_reducer(state, &Action::DeletePost("a".into()));
        assert_eq!(state.posts, vec![post("b")]);
    }

    #[test]
    fn failed_post_fetch_yields_empty_list() {
        let state = PostState {
            posts: vec![post("a")],
            loading: true,
            ..Default::default()
        };
        let state = post_reducer(state, &Action::GetPosts(None));
        assert!(state.posts.is_empty());
        assert!(!state.loading);
    }

    #[test]
    fn unrelated_actions_leave_slices_untouched() {
        let state = RootState {
            post: PostState {
                posts: vec![post("a")],
                ..Default::default()
            },
            ..Default::default()
        };
        let next = root_reducer(state.clone(), &Action::ClearCurrentProfile);
        assert_eq!(next, state);
    }
}
