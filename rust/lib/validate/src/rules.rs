use std::sync::OnceLock;

use devconnector_core::{FieldErrors, ServiceError};
use regex::Regex;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static URL_RE: OnceLock<Regex> = OnceLock::new();

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@.]{2,}$").expect("email pattern compiles")
    })
}

fn url_re() -> &'static Regex {
    URL_RE.get_or_init(|| {
        Regex::new(r"(?i)^(?:https?://)?(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z]{2,}(?::\d{1,5})?(?:[/?#]\S*)?$")
            .expect("url pattern compiles")
    })
}

/// Blank after trimming.
pub fn is_empty(value: &str) -> bool {
    value.trim().is_empty()
}

/// Character count within `min..=max`.
pub fn is_length(value: &str, min: usize, max: usize) -> bool {
    let n = value.chars().count();
    n >= min && n <= max
}

pub fn is_email(value: &str) -> bool {
    email_re().is_match(value.trim())
}

/// Accepts host names with or without an http(s) scheme.
pub fn is_url(value: &str) -> bool {
    url_re().is_match(value.trim())
}

/// Outcome of validating one input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Validation {
    pub errors: FieldErrors,
    pub is_valid: bool,
}

impl Validation {
    /// `Ok(())` when valid, otherwise a 400 carrying the error map.
    pub fn into_result(self) -> Result<(), ServiceError> {
        if self.is_valid {
            Ok(())
        } else {
            Err(ServiceError::BadRequest(self.errors))
        }
    }
}

/// Collects field errors.
///
/// Checks run in call order and a later failure on the same field replaces
/// the earlier message, so callers put the most specific check last.
#[derive(Debug, Default)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(&mut self, field: &str, value: &str, message: &str) -> &mut Self {
        if is_empty(value) {
            self.errors.insert(field, message);
        }
        self
    }

    pub fn length(&mut self, field: &str, value: &str, min: usize, max: usize, message: &str) -> &mut Self {
        if !is_length(value, min, max) {
            self.errors.insert(field, message);
        }
        self
    }

    pub fn email(&mut self, field: &str, value: &str, message: &str) -> &mut Self {
        if !is_email(value) {
            self.errors.insert(field, message);
        }
        self
    }

    /// Only checked when the value is present.
    pub fn optional_url(&mut self, field: &str, value: &str, message: &str) -> &mut Self {
        if !is_empty(value) && !is_url(value) {
            self.errors.insert(field, message);
        }
        self
    }

    pub fn equals(&mut self, field: &str, value: &str, other: &str, message: &str) -> &mut Self {
        if value != other {
            self.errors.insert(field, message);
        }
        self
    }

    pub fn finish(&mut self) -> Validation {
        let errors = std::mem::take(&mut self.errors);
        Validation {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}
