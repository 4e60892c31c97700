//! JSON request bodies that fail with the field-map error format.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::ServiceError;

/// Drop-in for `axum::Json` on the request side.
///
/// Malformed JSON, a body of the wrong shape, or a missing
/// `Content-Type: application/json` all become 400 `{"body": "..."}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(body_error(rejection)),
        }
    }
}

fn body_error(rejection: JsonRejection) -> ServiceError {
    let message = match &rejection {
        JsonRejection::JsonSyntaxError(_) => "Request body is not valid JSON".to_string(),
        JsonRejection::JsonDataError(e) => format!("Request body has the wrong shape: {}", e.body_text()),
        JsonRejection::MissingJsonContentType(_) => {
            "Request body must be sent as application/json".to_string()
        }
        other => other.body_text(),
    };
    tracing::debug!(status = %rejection.status(), "rejected request body: {}", rejection.body_text());
    ServiceError::bad_request("body", message)
}
