use jsonwebtoken::{decode, DecodingKey, Validation};
use tracing::{info, warn};

use devconnector_validate::{LoginInput, RegisterInput};

use crate::action::Action;
use crate::api::{ApiClient, ApiError};
use crate::model::{AuthUser, LoginResponse, RegisteredUser};
use crate::store::Store;

/// Read the claims of a session token without checking its signature.
///
/// The client cannot hold the signing secret; the server verifies the
/// token on every private request. Accepts the token with or without its
/// `Bearer ` prefix.
pub fn decode_token(token: &str) -> Result<AuthUser, ApiError> {
    let raw = token.strip_prefix("Bearer ").unwrap_or(token).trim();

    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;

    decode::<AuthUser>(raw, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|e| ApiError::Decode(format!("session token: {}", e)))
}

/// Create an account. Returns true on success so the UI can move on to
/// the login form.
pub async fn register_user(api: &ApiClient, store: &Store, input: &RegisterInput) -> bool {
    match api.post::<_, RegisteredUser>("/api/users/register", input).await {
        Ok(user) => {
            info!(user_id = %user.id, "registered");
            store.dispatch(Action::ClearErrors);
            true
        }
        Err(e) => {
            store.dispatch(Action::GetErrors(e.field_errors()));
            false
        }
    }
}

/// Log in, keep the token on the client and record the current user.
pub async fn login_user(api: &ApiClient, store: &Store, input: &LoginInput) {
    let result = async {
        let resp: LoginResponse = api.post("/api/users/login", input).await?;
        let user = decode_token(&resp.token)?;
        Ok::<_, ApiError>((resp.token, user))
    }
    .await;

    match result {
        Ok((token, user)) => {
            api.set_auth_token(Some(token));
            store.dispatch(Action::ClearErrors);
            store.dispatch(Action::SetCurrentUser(Some(user)));
        }
        Err(e) => store.dispatch(Action::GetErrors(e.field_errors())),
    }
}

/// Forget the token and the current user.
pub fn logout_user(api: &ApiClient, store: &Store) {
    api.set_auth_token(None);
    store.dispatch(Action::SetCurrentUser(None));
}

/// Resume a session from a previously saved token, e.g. at start-up.
///
/// An expired or unreadable token logs the user out and clears the
/// current profile. Returns whether a session is active afterwards.
pub fn restore_session(api: &ApiClient, store: &Store, token: &str) -> bool {
    let now = chrono::Utc::now().timestamp();
    match decode_token(token) {
        Ok(user) if !user.is_expired(now) => {
            api.set_auth_token(Some(token.to_string()));
            store.dispatch(Action::SetCurrentUser(Some(user)));
            true
        }
        Ok(_) => {
            info!("saved session expired");
            logout_user(api, store);
            store.dispatch(Action::ClearCurrentProfile);
            false
        }
        Err(e) => {
            warn!("discarding saved session: {}", e);
            logout_user(api, store);
            store.dispatch(Action::ClearCurrentProfile);
            false
        }
    }
}
