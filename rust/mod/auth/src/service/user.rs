use sha2::{Digest, Sha256};
use tracing::info;

use devconnector_store::DeleteBatch;
use devconnector_validate::{validate_login, validate_register, LoginInput, RegisterInput};

use crate::model::{PublicUser, TokenResponse, User};
use crate::service::{AuthError, AuthService};

// ── Password helpers ──

/// Hash a plain password with argon2id.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    use argon2::Argon2;
    use password_hash::rand_core::OsRng;
    use password_hash::{PasswordHasher, SaltString};

    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::Internal(format!("password hash failed: {}", e)))
}

/// Verify a password against an argon2id hash.
pub fn verify_password(password: &str, hash: &str) -> bool {
    use argon2::Argon2;
    use password_hash::{PasswordHash, PasswordVerifier};

    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    }
}

/// Gravatar URL for an email: 200px, pg rated, mystery-man fallback.
pub fn gravatar_url(email: &str) -> String {
    let digest = Sha256::digest(email.trim().to_lowercase().as_bytes());
    format!("https://www.gravatar.com/avatar/{:x}?s=200&r=pg&d=mm", digest)
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl AuthService {
    /// Create an account. Emails are unique, compared case-insensitively.
    pub fn register(&self, input: RegisterInput) -> Result<PublicUser, AuthError> {
        let check = validate_register(&input);
        if !check.is_valid {
            return Err(AuthError::Validation(check.errors));
        }

        let email = normalize_email(&input.email);
        if self.find_by_email(&email)?.is_some() {
            return Err(AuthError::EmailExists);
        }

        let user = User {
            id: String::new(),
            name: input.name.trim().to_string(),
            avatar: gravatar_url(&email),
            email,
            password: hash_password(&input.password)?,
            date: String::new(),
        };
        let user = self.users.save_new(user)?;

        info!(user_id = %user.id, "registered user");
        Ok(user.public())
    }

    /// Check credentials and issue a session token.
    pub fn login(&self, input: LoginInput) -> Result<TokenResponse, AuthError> {
        let check = validate_login(&input);
        if !check.is_valid {
            return Err(AuthError::Validation(check.errors));
        }

        let user = self
            .find_by_email(&normalize_email(&input.email))?
            .ok_or(AuthError::UserNotFound)?;

        if !verify_password(&input.password, &user.password) {
            return Err(AuthError::PasswordIncorrect);
        }

        let token = self.issue_token(&user)?;
        info!(user_id = %user.id, "user logged in");
        Ok(TokenResponse {
            success: true,
            token: format!("Bearer {}", token),
        })
    }

    pub fn get_user(&self, id: &str) -> Result<User, AuthError> {
        self.users.get(id)?.ok_or(AuthError::UserNotFound)
    }

    /// Find a user by email (scans all users).
    pub fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        Ok(self.users.find(|u| u.email == email)?)
    }

    /// Remove an account. Missing users are ignored.
    pub fn delete_user(&self, id: &str) -> Result<(), AuthError> {
        self.delete_user_with(id, DeleteBatch::new())
    }

    /// Remove an account together with documents owned elsewhere, in one
    /// transaction. Either everything is gone or nothing is.
    pub fn delete_user_with(&self, id: &str, owned: DeleteBatch) -> Result<(), AuthError> {
        self.users.delete_batch(id, owned)?;
        info!(user_id = %id, "deleted user");
        Ok(())
    }
}
