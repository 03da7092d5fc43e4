use crate::error::{ApiError, ErrorResponse};
use crate::models::HerbRecord;
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::StatusCode, Json};

/// GET /herbs/{name} handler - Fetch one herb by exact name
#[utoipa::path(
    get,
    path = routes::HERB_ITEM,
    params(
        ("name" = String, Path, description = "Exact herb name")
    ),
    responses(
        (status = 200, description = "Herb found", body = HerbRecord),
        (status = 404, description = "No herb with this name", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "herbs"
)]
pub async fn get_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<(StatusCode, Json<HerbRecord>), ApiError> {
    match state.store.find_by_name(&name).await? {
        Some(herb) => {
            tracing::info!("Retrieved herb: {}", name);
            Ok((StatusCode::OK, Json(herb)))
        }
        None => {
            tracing::info!("Herb not found: {}", name);
            Err(ApiError::HerbNotFound(name))
        }
    }
}
