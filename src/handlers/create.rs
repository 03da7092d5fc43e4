use crate::error::{ApiError, ErrorResponse};
use crate::extract::HerbBody;
use crate::models::HerbRecord;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode};

pub const CREATED_MESSAGE: &str = "Successfully added a new herb.";

/// POST /herbs handler - Add a herb
///
/// Stores the submitted fields as-is. The name must be non-empty and not
/// already in use.
#[utoipa::path(
    post,
    path = routes::HERBS,
    request_body(content = HerbRecord, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Herb stored", body = String, content_type = "text/plain"),
        (status = 400, description = "Blank name or malformed body", body = ErrorResponse),
        (status = 409, description = "A herb with this name exists", body = ErrorResponse),
        (status = 415, description = "Body is neither form-encoded nor JSON", body = ErrorResponse),
        (status = 422, description = "Body is missing required fields", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "herbs"
)]
pub async fn create_handler(
    State(state): State<AppState>,
    HerbBody(record): HerbBody<HerbRecord>,
) -> Result<(StatusCode, &'static str), ApiError> {
    if record.name.trim().is_empty() {
        return Err(ApiError::InvalidName);
    }

    let name = record.name.clone();
    state.store.insert(record).await?;

    tracing::info!("Added herb: {}", name);
    Ok((StatusCode::CREATED, CREATED_MESSAGE))
}
