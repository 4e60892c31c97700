//! Drives the action creators against a live in-memory server.

use std::sync::Arc;

use devconnector_auth::AuthConfig;
use devconnector_client::creators::{auth, post, profile};
use devconnector_client::{ApiClient, Store};
use devconnector_kv::MemoryStore;
use devconnector_validate::{ExperienceInput, LoginInput, PostInput, ProfileInput, RegisterInput};

async fn serve() -> String {
    let app = devconnectord::build_app(Arc::new(MemoryStore::new()), AuthConfig::default());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn register_input(name: &str, email: &str) -> RegisterInput {
    RegisterInput {
        name: name.into(),
        email: email.into(),
        password: "secret1".into(),
        password2: "secret1".into(),
    }
}

async fn sign_in(api: &ApiClient, store: &Store, name: &str, email: &str) {
    assert!(auth::register_user(api, store, &register_input(name, email)).await);
    auth::login_user(
        api,
        store,
        &LoginInput {
            email: email.into(),
            password: "secret1".into(),
        },
    )
    .await;
    assert!(store.state().auth.is_authenticated, "{:?}", store.state().errors);
}

#[tokio::test]
async fn register_and_login() {
    let base = serve().await;
    let api = ApiClient::new(&base);
    let store = Store::new();

    let mut bad = register_input("A", "not-an-email");
    bad.password2 = "different".into();
    assert!(!auth::register_user(&api, &store, &bad).await);
    let errors = store.state().errors;
    assert_eq!(errors.get("name"), Some("Name must be between 2 and 30 characters"));
    assert_eq!(errors.get("email"), Some("Email is invalid"));
    assert_eq!(errors.get("password2"), Some("Passwords must match"));

    sign_in(&api, &store, "Alice", "alice@example.com").await;
    let state = store.state();
    assert!(state.errors.is_empty());
    assert_eq!(state.auth.user.as_ref().map(|u| u.name.as_str()), Some("Alice"));
    assert!(api.auth_token().unwrap().starts_with("Bearer "));

    assert!(!auth::register_user(&api, &store, &register_input("Alice", "alice@example.com")).await);
    assert_eq!(store.state().errors.get("email"), Some("Email already exists"));

    auth::login_user(
        &api,
        &store,
        &LoginInput {
            email: "alice@example.com".into(),
            password: "wrong-password".into(),
        },
    )
    .await;
    assert_eq!(store.state().errors.get("password"), Some("Password incorrect"));

    auth::logout_user(&api, &store);
    assert!(!store.state().auth.is_authenticated);
    assert!(api.auth_token().is_none());
}

#[tokio::test]
async fn profile_flow() {
    let base = serve().await;
    let api = ApiClient::new(&base);
    let store = Store::new();
    sign_in(&api, &store, "Alice", "alice@example.com").await;

    profile::get_current_profile(&api, &store).await;
    assert!(store.state().profile.profile.is_none());
    assert!(!store.state().profile.loading);

    let input = ProfileInput {
        handle: "alice".into(),
        status: "Developer".into(),
        skills: "rust, sql ,  axum".into(),
        twitter: "https://twitter.com/alice".into(),
        ..Default::default()
    };
    assert!(profile::create_profile(&api, &store, &input).await);
    let current = store.state().profile.profile.unwrap();
    assert_eq!(current.handle, "alice");
    assert_eq!(current.skills, vec!["rust", "sql", "axum"]);
    assert_eq!(current.user.name, "Alice");
    assert_eq!(current.social.twitter, "https://twitter.com/alice");

    let bad = ProfileInput {
        website: "not a url".into(),
        ..input.clone()
    };
    assert!(!profile::create_profile(&api, &store, &bad).await);
    assert_eq!(store.state().errors.get("website"), Some("Not a valid URL"));

    let job = ExperienceInput {
        title: "Engineer".into(),
        company: "Acme".into(),
        from: "2020-01-01".into(),
        current: true,
        ..Default::default()
    };
    assert!(profile::add_experience(&api, &store, &job).await);
    let exp = store.state().profile.profile.unwrap().experience;
    assert_eq!(exp.len(), 1);
    assert!(profile::delete_experience(&api, &store, &exp[0].id).await);
    assert!(store.state().profile.profile.unwrap().experience.is_empty());

    profile::get_profile_by_handle(&api, &store, "alice").await;
    assert_eq!(store.state().profile.profile.map(|p| p.handle), Some("alice".to_string()));

    profile::get_profiles(&api, &store).await;
    assert_eq!(store.state().profile.profiles.map(|p| p.len()), Some(1));

    assert!(profile::delete_account(&api, &store).await);
    let state = store.state();
    assert!(!state.auth.is_authenticated);
    assert!(state.profile.profile.is_none());

    profile::get_profiles(&api, &store).await;
    assert!(store.state().profile.profiles.is_none());
}

#[tokio::test]
async fn post_flow() {
    let base = serve().await;
    let alice = ApiClient::new(&base);
    let alice_store = Store::new();
    sign_in(&alice, &alice_store, "Alice", "alice@example.com").await;

    let bob = ApiClient::new(&base);
    let bob_store = Store::new();
    sign_in(&bob, &bob_store, "Bob", "bob@example.com").await;

    post::add_post(&alice, &alice_store, &PostInput { text: "short".into(), ..Default::default() }).await;
    assert_eq!(
        alice_store.state().errors.get("text"),
        Some("Post must be between 10 and 300 characters")
    );

    let text = PostInput {
        text: "Hello DevConnector, first post".into(),
        ..Default::default()
    };
    post::add_post(&alice, &alice_store, &text).await;
    let state = alice_store.state();
    assert!(state.errors.is_empty());
    assert_eq!(state.post.posts.len(), 1);
    let post_id = state.post.posts[0].id.clone();
    assert_eq!(state.post.posts[0].name, "Alice");

    post::get_posts(&bob, &bob_store).await;
    assert_eq!(bob_store.state().post.posts.len(), 1);

    post::add_like(&bob, &bob_store, &post_id).await;
    assert_eq!(bob_store.state().post.posts[0].likes.len(), 1);

    post::add_like(&bob, &bob_store, &post_id).await;
    let state = bob_store.state();
    assert_eq!(state.errors.get("alreadyliked"), Some("User already liked this post"));
    assert_eq!(state.post.posts[0].likes.len(), 1);

    post::remove_like(&bob, &bob_store, &post_id).await;
    assert!(bob_store.state().post.posts[0].likes.is_empty());

    let reply = PostInput {
        text: "Welcome aboard, Alice!".into(),
        ..Default::default()
    };
    post::add_comment(&bob, &bob_store, &post_id, &reply).await;
    let current = bob_store.state().post.post.unwrap();
    assert_eq!(current.comments.len(), 1);
    assert_eq!(current.comments[0].name, "Bob");

    post::delete_comment(&bob, &bob_store, &post_id, &current.comments[0].id).await;
    assert!(bob_store.state().post.post.unwrap().comments.is_empty());

    post::delete_post(&bob, &bob_store, &post_id).await;
    assert_eq!(bob_store.state().errors.get("notauthorized"), Some("User not authorized"));
    assert_eq!(bob_store.state().post.posts.len(), 1);

    post::delete_post(&alice, &alice_store, &post_id).await;
    assert!(alice_store.state().post.posts.is_empty());

    post::get_post(&bob, &bob_store, &post_id).await;
    assert!(bob_store.state().post.post.is_none());
}
