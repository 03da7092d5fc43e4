use crate::error::{ApiError, ErrorResponse};
use crate::extract::HerbBody;
use crate::models::{HerbPatch, HerbRecord};
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::StatusCode};

pub const UPDATED_MESSAGE: &str = "Successfully updated herb.";

/// PUT /herbs/{name} handler - Replace every field of a herb
///
/// Fields missing from the body are cleared. A `name` in the body renames
/// the herb; without one the current name is kept.
#[utoipa::path(
    put,
    path = routes::HERB_ITEM,
    params(
        ("name" = String, Path, description = "Exact herb name")
    ),
    request_body(content = HerbPatch, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Herb replaced", body = String, content_type = "text/plain"),
        (status = 400, description = "Blank name or malformed body", body = ErrorResponse),
        (status = 404, description = "No herb with this name", body = ErrorResponse),
        (status = 409, description = "Renaming onto an existing herb", body = ErrorResponse),
        (status = 415, description = "Body is neither form-encoded nor JSON", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "herbs"
)]
pub async fn replace_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    HerbBody(patch): HerbBody<HerbPatch>,
) -> Result<(StatusCode, &'static str), ApiError> {
    let record = HerbRecord::replacement(&name, patch);
    if record.name.trim().is_empty() {
        return Err(ApiError::InvalidName);
    }

    state.store.replace_by_name(&name, record).await?;

    tracing::info!("Replaced herb: {}", name);
    Ok((StatusCode::OK, UPDATED_MESSAGE))
}
