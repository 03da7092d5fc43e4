use crate::error::{ApiError, ErrorResponse};
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::StatusCode};

pub const DELETED_MESSAGE: &str = "Successfully deleted herb.";

/// DELETE /herbs/{name} handler - Remove one herb
#[utoipa::path(
    delete,
    path = routes::HERB_ITEM,
    params(
        ("name" = String, Path, description = "Exact herb name")
    ),
    responses(
        (status = 200, description = "Herb deleted", body = String, content_type = "text/plain"),
        (status = 404, description = "No herb with this name", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "herbs"
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<(StatusCode, &'static str), ApiError> {
    state.store.delete_by_name(&name).await?;

    tracing::info!("Deleted herb: {}", name);
    Ok((StatusCode::OK, DELETED_MESSAGE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{body_text, fetch_herb, post_basil, send, test_app, FORM};

    #[tokio::test]
    async fn test_delete_removes_exactly_that_herb() {
        let app = test_app();
        post_basil(&app).await;
        send(&app, "POST", "/herbs", Some((FORM, "name=Sage"))).await;

        let response = send(&app, "DELETE", "/herbs/Basil", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, DELETED_MESSAGE);

        assert_eq!(fetch_herb(&app, "Basil").await, None);
        assert!(fetch_herb(&app, "Sage").await.is_some());
    }

    #[tokio::test]
    async fn test_delete_missing_herb_is_not_found() {
        let app = test_app();

        let response = send(&app, "DELETE", "/herbs/Basil", None).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let error: ErrorResponse = serde_json::from_str(&body_text(response).await).unwrap();
        assert!(error.error.contains("Basil"));
    }
}
