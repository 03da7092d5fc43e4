use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers;
use crate::models::{HealthResponse, HerbPatch, HerbRecord, UnhealthyResponse};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "herb-api",
        version = "1.0.0",
        description = "A small REST API for herb planting records"
    ),
    paths(
        handlers::root::root_handler,
        handlers::health::health_handler,
        handlers::list::list_handler,
        handlers::create::create_handler,
        handlers::delete_all::delete_all_handler,
        handlers::get::get_handler,
        handlers::replace::replace_handler,
        handlers::update::update_handler,
        handlers::delete::delete_handler
    ),
    components(
        schemas(
            HerbRecord,
            HerbPatch,
            ErrorResponse,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "herbs", description = "Herb record operations")
    )
)]
pub struct ApiDoc;
