use serde::{Deserialize, Serialize};

use devconnector_store::Document;
use devconnector_validate::ProfileInput;

use crate::model::{Education, Experience};

/// Social links. Empty means unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Social {
    pub youtube: String,
    pub twitter: String,
    pub facebook: String,
    pub linkedin: String,
    pub instagram: String,
}

/// The owning user as shown alongside a profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: String,
    pub name: String,
    pub avatar: String,
}

/// A developer profile, one per user.
///
/// Stored with `user` holding the owner's id and keyed by it. Responses
/// use [`ProfileView`], where `user` is expanded to a [`UserRef`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile<U = String> {
    pub id: String,
    pub user: U,
    pub handle: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub location: String,
    pub status: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub githubusername: String,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub social: Social,
    pub date: String,
}

pub type ProfileView = Profile<UserRef>;

/// Split a comma-separated skills string, dropping blanks.
pub fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl Profile {
    /// A fresh profile for `user_id` built from an upsert body.
    pub fn new(user_id: &str, input: ProfileInput) -> Self {
        let mut profile = Profile {
            id: String::new(),
            user: user_id.to_string(),
            handle: String::new(),
            company: String::new(),
            website: String::new(),
            location: String::new(),
            status: String::new(),
            skills: Vec::new(),
            bio: String::new(),
            githubusername: String::new(),
            experience: Vec::new(),
            education: Vec::new(),
            social: Social::default(),
            date: String::new(),
        };
        profile.apply(input);
        profile
    }

    /// Overwrite the editable fields. Experience and education are kept.
    pub fn apply(&mut self, input: ProfileInput) {
        self.handle = input.handle.trim().to_string();
        self.company = input.company;
        self.website = input.website;
        self.location = input.location;
        self.status = input.status;
        self.skills = split_skills(&input.skills);
        self.bio = input.bio;
        self.githubusername = input.githubusername;
        self.social = Social {
            youtube: input.youtube,
            twitter: input.twitter,
            facebook: input.facebook,
            linkedin: input.linkedin,
            instagram: input.instagram,
        };
    }

    pub fn populate(self, user: UserRef) -> ProfileView {
        Profile {
            id: self.id,
            user,
            handle: self.handle,
            company: self.company,
            website: self.website,
            location: self.location,
            status: self.status,
            skills: self.skills,
            bio: self.bio,
            githubusername: self.githubusername,
            experience: self.experience,
            education: self.education,
            social: self.social,
            date: self.date,
        }
    }
}

impl Document for Profile {
    const COLLECTION: &'static str = "profiles";

    fn key_value(&self) -> String {
        self.user.clone()
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
