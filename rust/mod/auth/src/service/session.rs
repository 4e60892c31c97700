use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use devconnector_core::{CurrentUser, ServiceError, TokenVerifier};

use crate::model::{Claims, User};
use crate::service::{AuthError, AuthService};

impl AuthService {
    /// Sign a session token (HS256) for a user.
    pub fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: user.id.clone(),
            name: user.name.clone(),
            avatar: user.avatar.clone(),
            iat: now.timestamp(),
            exp: (now + chrono::Duration::seconds(self.config.token_ttl)).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::Internal(format!("JWT encode failed: {}", e)))
    }

    /// Verify and decode a session token.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::default();
        validation.validate_exp = true;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(token_data.claims)
    }
}

impl TokenVerifier for AuthService {
    /// A valid signature is not enough: the account must still exist, so
    /// tokens of deleted accounts stop working immediately.
    fn verify(&self, token: &str) -> Result<CurrentUser, ServiceError> {
        let claims = self.verify_token(token)?;
        let user = self.users.get(&claims.sub)?.ok_or_else(|| {
            AuthError::InvalidToken(format!("user '{}' no longer exists", claims.sub))
        })?;

        Ok(CurrentUser {
            id: user.id,
            name: user.name,
            avatar: user.avatar,
        })
    }
}
