use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::store::StoreError;

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Custom error type for API endpoints
///
/// Every failure leaves the server as a non-2xx status with a JSON
/// `ErrorResponse` body.
#[derive(Debug)]
pub enum ApiError {
    /// No herb is stored under this name
    HerbNotFound(String),
    /// A herb with this name already exists
    HerbExists(String),
    /// Herb names address records in the URL and cannot be blank
    InvalidName,
    /// The request body could not be decoded
    InvalidBody { status: StatusCode, message: String },
    /// The request body is neither form-encoded nor JSON
    UnsupportedContentType(String),
    /// Database operation error
    DatabaseError(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::HerbNotFound(name) => (
                StatusCode::NOT_FOUND,
                format!("Herb not found: {}", name),
            ),
            ApiError::HerbExists(name) => (
                StatusCode::CONFLICT,
                format!("Herb already exists: {}", name),
            ),
            ApiError::InvalidName => (
                StatusCode::BAD_REQUEST,
                "Herb name must not be empty".to_string(),
            ),
            ApiError::InvalidBody { status, message } => {
                (status, format!("Invalid request body: {}", message))
            }
            ApiError::UnsupportedContentType(content_type) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                format!(
                    "Unsupported content type '{}': expected application/x-www-form-urlencoded or application/json",
                    content_type
                ),
            ),
            ApiError::DatabaseError(err) => {
                tracing::error!("Database error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Database error: {}", err),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(name) => ApiError::HerbNotFound(name),
            StoreError::Conflict(name) => ApiError::HerbExists(name),
            StoreError::Backend(err) => ApiError::DatabaseError(err),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::DatabaseError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn render(err: ApiError) -> (StatusCode, ErrorResponse) {
        let response = err.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_store_errors_map_to_status_codes() {
        let (status, body) = render(StoreError::NotFound("Sage".into()).into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.error.contains("Sage"));

        let (status, _) = render(StoreError::Conflict("Sage".into()).into()).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, body) =
            render(StoreError::Backend(anyhow::anyhow!("connection refused")).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.error.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_body_errors_keep_their_status() {
        let (status, body) = render(ApiError::InvalidBody {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: "missing field `name`".to_string(),
        })
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body.error.contains("missing field"));

        let (status, _) = render(ApiError::UnsupportedContentType("text/plain".into())).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
