use std::sync::Arc;

use tracing::info;

use devconnector_core::{CurrentUser, ServiceError};
use devconnector_kv::KVStore;
use devconnector_store::DocOps;
use devconnector_validate::{validate_post, PostInput};

use crate::model::{Comment, Like, Post};

fn post_not_found() -> ServiceError {
    ServiceError::not_found("postnotfound", "No post found")
}

pub struct PostService {
    posts: DocOps<Post>,
}

impl PostService {
    pub fn new(kv: Arc<dyn KVStore>) -> Arc<Self> {
        Arc::new(Self {
            posts: DocOps::new(kv),
        })
    }

    fn load(&self, id: &str) -> Result<Post, ServiceError> {
        self.posts.get_or(id, post_not_found)
    }

    /// All posts, newest first.
    pub fn list(&self) -> Result<Vec<Post>, ServiceError> {
        let mut posts = self.posts.list()?;
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(posts)
    }

    pub fn get(&self, id: &str) -> Result<Post, ServiceError> {
        self.posts
            .get_or(id, || ServiceError::not_found("nopostfound", "No post found with that ID"))
    }

    pub fn create(&self, author: &CurrentUser, input: PostInput) -> Result<Post, ServiceError> {
        validate_post(&input).into_result()?;

        let post = self.posts.save_new(Post::new(author, input))?;
        info!(post_id = %post.id, user_id = %author.id, "created post");
        Ok(post)
    }

    /// Only the author may delete a post.
    pub fn delete(&self, caller: &CurrentUser, id: &str) -> Result<(), ServiceError> {
        let post = self.load(id)?;
        if post.user != caller.id {
            return Err(ServiceError::unauthorized("notauthorized", "User not authorized"));
        }

        self.posts.delete(&post.id)?;
        info!(post_id = %post.id, "deleted post");
        Ok(())
    }

    pub fn like(&self, caller: &CurrentUser, id: &str) -> Result<Post, ServiceError> {
        let mut post = self.load(id)?;
        if post.liked_by(&caller.id) {
            return Err(ServiceError::bad_request("alreadyliked", "User already liked this post"));
        }

        post.likes.insert(0, Like { user: caller.id.clone() });
        self.posts.save(post)
    }

    pub fn unlike(&self, caller: &CurrentUser, id: &str) -> Result<Post, ServiceError> {
        let mut post = self.load(id)?;
        if !post.liked_by(&caller.id) {
            return Err(ServiceError::bad_request("notliked", "You have not yet liked this post"));
        }

        post.likes.retain(|l| l.user != caller.id);
        self.posts.save(post)
    }

    /// Append a comment.
    pub fn comment(&self, caller: &CurrentUser, id: &str, input: PostInput) -> Result<Post, ServiceError> {
        validate_post(&input).into_result()?;

        let mut post = self.load(id)?;
        post.comments.push(Comment::new(caller, input));
        self.posts.save(post)
    }

    /// Remove a comment by id. Any signed-in user may remove any comment.
    pub fn delete_comment(&self, id: &str, comment_id: &str) -> Result<Post, ServiceError> {
        let mut post = self.load(id)?;
        let index = post
            .comments
            .iter()
            .position(|c| c.id == comment_id)
            .ok_or_else(|| ServiceError::not_found("commentnotexists", "Comment does not exist"))?;

        post.comments.remove(index);
        self.posts.save(post)
    }
}
