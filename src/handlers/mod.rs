pub mod root;
pub mod health;
pub mod list;
pub mod create;
pub mod delete_all;
pub mod get;
pub mod replace;
pub mod update;
pub mod delete;

pub use root::root_handler;
pub use health::health_handler;
pub use list::list_handler;
pub use create::create_handler;
pub use delete_all::delete_all_handler;
pub use get::get_handler;
pub use replace::replace_handler;
pub use update::update_handler;
pub use delete::delete_handler;

/// Router fixtures backed by the in-memory store
#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::Config;
    use crate::memory::MemoryStore;
    use crate::models::HerbRecord;
    use crate::state::AppState;
    use crate::store::HerbStore;
    use axum::{
        body::Body,
        http::{header::CONTENT_TYPE, Request, StatusCode},
        response::Response,
        Router,
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    pub const FORM: &str = "application/x-www-form-urlencoded";
    pub const JSON: &str = "application/json";

    pub const BASIL_FORM: &str = "name=Basil&depth=0.25in&spacing=10in&height=18in\
        &daysToGerminate=5-10&daysToHarvest=60-90&minPotDiameter=6in";

    pub fn test_app() -> Router {
        let state = AppState {
            store: HerbStore::Memory(MemoryStore::new()),
            config: Arc::new(Config::in_memory()),
        };
        crate::app::router(state)
    }

    /// Send one request; `body` is a (content type, payload) pair
    pub async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<(&str, &str)>,
    ) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some((content_type, payload)) => builder
                .header(CONTENT_TYPE, content_type)
                .body(Body::from(payload.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        app.clone().oneshot(request).await.unwrap()
    }

    pub async fn body_text(response: Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    pub async fn fetch_herb(app: &Router, name: &str) -> Option<HerbRecord> {
        let response = send(app, "GET", &format!("/herbs/{}", name), None).await;
        match response.status() {
            StatusCode::OK => Some(serde_json::from_str(&body_text(response).await).unwrap()),
            StatusCode::NOT_FOUND => None,
            other => panic!("unexpected status fetching herb: {}", other),
        }
    }

    pub async fn post_basil(app: &Router) {
        let response = send(app, "POST", "/herbs", Some((FORM, BASIL_FORM))).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
