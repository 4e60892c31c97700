use serde::{Deserialize, Serialize};

use devconnector_core::CurrentUser;
use devconnector_store::Document;
use devconnector_validate::PostInput;

/// A like, one per user per post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Like {
    pub user: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub user: String,
    pub text: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    pub date: String,
}

/// A post with its likes (newest first) and comments (oldest first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    /// Author's user id.
    pub user: String,
    pub text: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub likes: Vec<Like>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub date: String,
}

/// Name and avatar from the body, or the session's when left blank.
fn author_snapshot(input: &PostInput, author: &CurrentUser) -> (String, String) {
    let pick = |given: &str, fallback: &str| {
        if given.trim().is_empty() {
            fallback.to_string()
        } else {
            given.to_string()
        }
    };
    (pick(&input.name, &author.name), pick(&input.avatar, &author.avatar))
}

impl Post {
    pub fn new(author: &CurrentUser, input: PostInput) -> Self {
        let (name, avatar) = author_snapshot(&input, author);
        Post {
            id: String::new(),
            user: author.id.clone(),
            text: input.text,
            name,
            avatar,
            likes: Vec::new(),
            comments: Vec::new(),
            date: String::new(),
        }
    }

    pub fn liked_by(&self, user_id: &str) -> bool {
        self.likes.iter().any(|l| l.user == user_id)
    }
}

impl Comment {
    pub fn new(author: &CurrentUser, input: PostInput) -> Self {
        let (name, avatar) = author_snapshot(&input, author);
        Comment {
            id: devconnector_core::new_id(),
            user: author.id.clone(),
            text: input.text,
            name,
            avatar,
            date: devconnector_core::now_rfc3339(),
        }
    }
}

impl Document for Post {
    const COLLECTION: &'static str = "posts";

    fn key_value(&self) -> String {
        self.id.clone()
    }

    fn before_create(&mut self) {
        if self.id.is_empty() {
            self.id = devconnector_core::new_id();
        }
        if self.date.is_empty() {
            self.date = devconnector_core::now_rfc3339();
        }
    }
}
