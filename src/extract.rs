use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Request body accepted either as a URL-encoded form or as JSON
///
/// The format is chosen from the `Content-Type` header. Form posts are the
/// primary format; JSON is accepted for API clients.
#[derive(Debug)]
pub struct HerbBody<T>(pub T);

impl<T, S> FromRequest<S> for HerbBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::InvalidBody {
                    status: rejection.status(),
                    message: rejection.body_text(),
                })?;
            Ok(HerbBody(value))
        } else if content_type.starts_with("application/json") {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::InvalidBody {
                    status: rejection.status(),
                    message: rejection.body_text(),
                })?;
            Ok(HerbBody(value))
        } else {
            Err(ApiError::UnsupportedContentType(content_type))
        }
    }
}
