use crate::error::{ApiError, ErrorResponse};
use crate::models::HerbRecord;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /herbs handler - List every herb
///
/// Returns a JSON array in insertion order; an empty collection gives `[]`.
#[utoipa::path(
    get,
    path = routes::HERBS,
    responses(
        (status = 200, description = "All stored herbs", body = Vec<HerbRecord>),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "herbs"
)]
pub async fn list_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Vec<HerbRecord>>), ApiError> {
    let herbs = state.store.find_all().await?;

    tracing::info!("Listed {} herbs", herbs.len());
    Ok((StatusCode::OK, Json(herbs)))
}
