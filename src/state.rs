use crate::config::Config;
use crate::store::HerbStore;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: HerbStore,
    pub config: Arc<Config>,
}
