//! Request bodies and their validators.
//!
//! Missing fields deserialize as empty strings, so a partial body is
//! reported field by field instead of failing as malformed JSON.

use serde::{Deserialize, Serialize};

use crate::rules::{Validation, Validator};

const NOT_A_URL: &str = "Not a valid URL";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password2: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Body of a new post or comment. `name` and `avatar` are the author
/// snapshot; when blank the server uses the caller's token identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostInput {
    pub text: String,
    pub name: String,
    pub avatar: String,
}

/// Profile upsert body. `skills` is a comma-separated list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileInput {
    pub handle: String,
    pub company: String,
    pub website: String,
    pub location: String,
    pub status: String,
    pub skills: String,
    pub bio: String,
    pub githubusername: String,
    pub youtube: String,
    pub twitter: String,
    pub facebook: String,
    pub linkedin: String,
    pub instagram: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceInput {
    pub title: String,
    pub company: String,
    pub location: String,
    pub from: String,
    pub to: String,
    pub current: bool,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationInput {
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from: String,
    pub to: String,
    pub current: bool,
    pub description: String,
}

pub fn validate_register(input: &RegisterInput) -> Validation {
    Validator::new()
        .length("name", &input.name, 2, 30, "Name must be between 2 and 30 characters")
        .required("name", &input.name, "Name field is required")
        .email("email", &input.email, "Email is invalid")
        .required("email", &input.email, "Email field is required")
        .length("password", &input.password, 6, 30, "Password must be at least 6 characters")
        .required("password", &input.password, "Password field is required")
        .equals("password2", &input.password2, &input.password, "Passwords must match")
        .required("password2", &input.password2, "Confirm Password field is required")
        .finish()
}

pub fn validate_login(input: &LoginInput) -> Validation {
    Validator::new()
        .email("email", &input.email, "Email is invalid")
        .required("email", &input.email, "Email field is required")
        .required("password", &input.password, "Password field is required")
        .finish()
}

/// Shared by posts and comments.
pub fn validate_post(input: &PostInput) -> Validation {
    Validator::new()
        .length("text", &input.text, 10, 300, "Post must be between 10 and 300 characters")
        .required("text", &input.text, "Text field is required")
        .finish()
}

pub fn validate_profile(input: &ProfileInput) -> Validation {
    Validator::new()
        .length("handle", input.handle.trim(), 2, 40, "Handle needs to be between 2 and 40 characters")
        .required("handle", &input.handle, "Profile handle is required")
        .required("status", &input.status, "Status field is required")
        .required("skills", &input.skills, "Skills field is required")
        .optional_url("website", &input.website, NOT_A_URL)
        .optional_url("youtube", &input.youtube, NOT_A_URL)
        .optional_url("twitter", &input.twitter, NOT_A_URL)
        .optional_url("facebook", &input.facebook, NOT_A_URL)
        .optional_url("linkedin", &input.linkedin, NOT_A_URL)
        .optional_url("instagram", &input.instagram, NOT_A_URL)
        .finish()
}

pub fn validate_experience(input: &ExperienceInput) -> Validation {
    Validator::new()
        .required("title", &input.title, "Job title field is required")
        .required("company", &input.company, "Company field is required")
        .required("from", &input.from, "From date field is required")
        .finish()
}

pub fn validate_education(input: &EducationInput) -> Validation {
    Validator::new()
        .required("school", &input.school, "School field is required")
        .required("degree", &input.degree, "Degree field is required")
        .required("fieldofstudy", &input.fieldofstudy, "Field of study field is required")
        .required("from", &input.from, "From date field is required")
        .finish()
}
