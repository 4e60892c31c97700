//! Input shapes accepted by the API and the checks applied to them.
//!
//! The form types are shared by the server modules (request bodies) and the
//! client crate (what it sends). Every validator returns a [`Validation`]:
//! a field-keyed error map plus an `is_valid` flag.

pub mod forms;
pub mod rules;

pub use forms::{
    validate_education, validate_experience, validate_login, validate_post, validate_profile,
    validate_register, EducationInput, ExperienceInput, LoginInput, PostInput, ProfileInput,
    RegisterInput,
};
pub use rules::{is_email, is_empty, is_length, is_url, Validation, Validator};
