use devconnector_validate::PostInput;
use serde_json::Value;

use crate::action::Action;
use crate::api::{ApiClient, ApiError};
use crate::model::Post;
use crate::store::Store;

fn fail(store: &Store, e: ApiError) {
    store.dispatch(Action::GetErrors(e.field_errors()));
}

pub async fn add_post(api: &ApiClient, store: &Store, input: &PostInput) {
    store.dispatch(Action::ClearErrors);
    match api.post::<_, Post>("/api/posts", input).await {
        Ok(post) => store.dispatch(Action::AddPost(post)),
        Err(e) => fail(store, e),
    }
}

/// Load the feed. A failed fetch leaves an empty feed.
pub async fn get_posts(api: &ApiClient, store: &Store) {
    store.dispatch(Action::PostLoading);
    let posts = api.get::<Vec<Post>>("/api/posts").await.ok();
    store.dispatch(Action::GetPosts(posts));
}

pub async fn get_post(api: &ApiClient, store: &Store, id: &str) {
    store.dispatch(Action::PostLoading);
    let post = api.get::<Post>(&format!("/api/posts/{}", id)).await.ok();
    store.dispatch(Action::GetPost(post));
}

pub async fn delete_post(api: &ApiClient, store: &Store, id: &str) {
    match api.delete::<Value>(&format!("/api/posts/{}", id)).await {
        Ok(_) => store.dispatch(Action::DeletePost(id.to_string())),
        Err(e) => fail(store, e),
    }
}

/// Like a post, then reload the feed so counts are fresh.
pub async fn add_like(api: &ApiClient, store: &Store, id: &str) {
    match api.post_empty::<Post>(&format!("/api/posts/like/{}", id)).await {
        Ok(_) => get_posts(api, store).await,
        Err(e) => fail(store, e),
    }
}

pub async fn remove_like(api: &ApiClient, store: &Store, id: &str) {
    match api.delete::<Post>(&format!("/api/posts/unlike/{}", id)).await {
        Ok(_) => get_posts(api, store).await,
        Err(e) => fail(store, e),
    }
}

pub async fn add_comment(api: &ApiClient, store: &Store, post_id: &str, input: &PostInput) {
    store.dispatch(Action::ClearErrors);
    match api
        .post::<_, Post>(&format!("/api/posts/comment/{}", post_id), input)
        .await
    {
        Ok(post) => store.dispatch(Action::GetPost(Some(post))),
        Err(e) => fail(store, e),
    }
}

pub async fn delete_comment(api: &ApiClient, store: &Store, post_id: &str, comment_id: &str) {
    match api
        .delete::<Post>(&format!("/api/posts/comment/{}/{}", post_id, comment_id))
        .await
    {
        Ok(post) => store.dispatch(Action::GetPost(Some(post))),
        Err(e) => fail(store, e),
    }
}
