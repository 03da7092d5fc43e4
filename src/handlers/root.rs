use crate::routes;

pub const GREETING: &str = "Hello, Catnip! 🐱‍👓";

/// GET / handler - Static greeting
#[utoipa::path(
    get,
    path = routes::ROOT,
    responses(
        (status = 200, description = "Greeting", body = String, content_type = "text/plain")
    ),
    tag = "herbs"
)]
pub async fn root_handler() -> &'static str {
    GREETING
}
