use crate::error::{ApiError, ErrorResponse};
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode};

pub const DELETED_ALL_MESSAGE: &str = "Successfully deleted all herbs.";

/// DELETE /herbs handler - Remove every herb
#[utoipa::path(
    delete,
    path = routes::HERBS,
    responses(
        (status = 200, description = "Collection emptied", body = String, content_type = "text/plain"),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "herbs"
)]
pub async fn delete_all_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, &'static str), ApiError> {
    let removed = state.store.delete_all().await?;

    tracing::info!("Deleted all herbs ({} removed)", removed);
    Ok((StatusCode::OK, DELETED_ALL_MESSAGE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{body_text, post_basil, send, test_app, FORM};

    #[tokio::test]
    async fn test_delete_all_empties_collection() {
        let app = test_app();
        post_basil(&app).await;
        send(&app, "POST", "/herbs", Some((FORM, "name=Sage"))).await;

        let response = send(&app, "DELETE", "/herbs", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, DELETED_ALL_MESSAGE);

        let response = send(&app, "GET", "/herbs", None).await;
        assert_eq!(body_text(response).await, "[]");
    }

    #[tokio::test]
    async fn test_delete_all_on_empty_collection() {
        let response = send(&test_app(), "DELETE", "/herbs", None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
