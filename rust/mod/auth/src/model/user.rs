use serde::{Deserialize, Serialize};

use devconnector_store::Document;

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier (UUIDv4, no dashes).
    pub id: String,

    pub name: String,

    /// Lowercased at registration; unique across users.
    pub email: String,

    /// Argon2id PHC string. Never leaves the server.
    pub password: String,

    /// Gravatar URL derived from the email.
    pub avatar: String,

    /// RFC 3339 registration timestamp.
    pub date: String,
}

impl User {
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            avatar: self.avatar.clone(),
            date: self.date.clone(),
        }
    }
}

impl Document for User {
    const COLLECTION: &'static str = "users";

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

/// A user as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub date: String,
}
