use crate::error::{ApiError, ErrorResponse};
use crate::extract::HerbBody;
use crate::models::HerbPatch;
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::StatusCode};

use super::replace::UPDATED_MESSAGE;

/// PATCH /herbs/{name} handler - Merge the given fields into a herb
#[utoipa::path(
    patch,
    path = routes::HERB_ITEM,
    params(
        ("name" = String, Path, description = "Exact herb name")
    ),
    request_body(content = HerbPatch, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Herb updated", body = String, content_type = "text/plain"),
        (status = 400, description = "Blank name or malformed body", body = ErrorResponse),
        (status = 404, description = "No herb with this name", body = ErrorResponse),
        (status = 409, description = "Renaming onto an existing herb", body = ErrorResponse),
        (status = 415, description = "Body is neither form-encoded nor JSON", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "herbs"
)]
pub async fn update_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    HerbBody(patch): HerbBody<HerbPatch>,
) -> Result<(StatusCode, &'static str), ApiError> {
    if patch.name.as_deref().is_some_and(|new_name| new_name.trim().is_empty()) {
        return Err(ApiError::InvalidName);
    }

    let herb = state.store.update_by_name(&name, patch).await?;

    tracing::info!("Updated herb: {} (now '{}')", name, herb.name);
    Ok((StatusCode::OK, UPDATED_MESSAGE))
}
