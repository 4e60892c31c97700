//! HTTP access to the DevConnector API.

use std::sync::RwLock;

use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde::Serialize;

use devconnector_core::FieldErrors;

// ── Error ───────────────────────────────────────────────────────────

/// Client-side API error.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx response. `errors` is the server's field map.
    #[error("HTTP {status}: {errors}")]
    Server { status: u16, errors: FieldErrors },

    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("decode: {0}")]
    Decode(String),
}

impl ApiError {
    /// The error as a field map, suitable for `Action::GetErrors`.
    pub fn field_errors(&self) -> FieldErrors {
        match self {
            ApiError::Server { errors, .. } => errors.clone(),
            ApiError::Network(e) => FieldErrors::single("network", e.to_string()),
            ApiError::Decode(m) => FieldErrors::single("decode", m.clone()),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ── ApiClient ───────────────────────────────────────────────────────

/// JSON client for the `/api` routes.
///
/// Once a token is set with [`ApiClient::set_auth_token`], it is sent as
/// the `Authorization` header on every request.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        }
    }

    /// Set or clear the header value, e.g. `Some("Bearer eyJ...")`.
    pub fn set_auth_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = token;
    }

    pub fn auth_token(&self) -> Option<String> {
        self.token.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.auth_token() {
            Some(token) => builder.header(AUTHORIZATION, token),
            None => builder,
        }
    }

    /// Parse an API response, mapping HTTP errors to `ApiError`.
    async fn parse<R: DeserializeOwned>(resp: reqwest::Response) -> Result<R, ApiError> {
        let status = resp.status();
        if !status.is_success() {
            let code = status.as_u16();
            let body = resp.text().await.unwrap_or_default();
            let errors = serde_json::from_str::<FieldErrors>(&body)
                .unwrap_or_else(|_| FieldErrors::single("server", body));
            return Err(ApiError::Server { status: code, errors });
        }
        resp.json::<R>()
            .await
            .map_err(|e| ApiError::Decode(format!("response body: {}", e)))
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let resp = self.authed(self.http.get(self.url(path))).send().await?;
        Self::parse(resp).await
    }

    pub async fn post<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        let resp = self
            .authed(self.http.post(self.url(path)).json(body))
            .send()
            .await?;
        Self::parse(resp).await
    }

    /// POST without a body.
    pub async fn post_empty<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let resp = self.authed(self.http.post(self.url(path))).send().await?;
        Self::parse(resp).await
    }

    pub async fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let resp = self.authed(self.http.delete(self.url(path))).send().await?;
        Self::parse(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_set_and_clear() {
        let api = ApiClient::new("http://localhost:5000/");
        assert_eq!(api.url("/api/posts"), "http://localhost:5000/api/posts");
        assert!(api.auth_token().is_none());

        api.set_auth_token(Some("Bearer abc".into()));
        assert_eq!(api.auth_token().as_deref(), Some("Bearer abc"));

        api.set_auth_token(None);
        assert!(api.auth_token().is_none());
    }

    #[test]
    fn server_error_exposes_field_map() {
        let err = ApiError::Server {
            status: 404,
            errors: FieldErrors::single("noprofile", "There are no profiles"),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.field_errors().get("noprofile"), Some("There are no profiles"));

        let decode = ApiError::Decode("bad".into());
        assert_eq!(decode.field_errors().get("decode"), Some("bad"));
    }
}
