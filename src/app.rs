use axum::{Router, routing::get};
use tower_http::{services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::routes;
use crate::state::AppState;

/// Build the full HTTP router
///
/// Paths that match no route fall through to files in the public directory.
pub fn router(state: AppState) -> Router {
    let public_dir = ServeDir::new(&state.config.public_dir);

    Router::new()
        .route(routes::ROOT, get(handlers::root_handler))
        .route(routes::HEALTH, get(handlers::health_handler))
        .route(
            routes::HERBS,
            get(handlers::list_handler)
                .post(handlers::create_handler)
                .delete(handlers::delete_all_handler),
        )
        .route(
            routes::HERB_ITEM,
            get(handlers::get_handler)
                .put(handlers::replace_handler)
                .patch(handlers::update_handler)
                .delete(handlers::delete_handler),
        )
        .merge(SwaggerUi::new(routes::SWAGGER_UI).url(routes::OPENAPI_JSON, ApiDoc::openapi()))
        .fallback_service(public_dir)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
