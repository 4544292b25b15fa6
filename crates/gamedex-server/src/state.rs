use std::sync::Arc;

use crate::config::ServerConfig;
use crate::database::GameDatabase;
use crate::store::{GameStore, build_store};

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<GameDatabase>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Build state with the store selected by `config.store`.
    pub fn new(config: ServerConfig) -> Self {
        let store = build_store(&config.store);
        Self::with_store(config, store)
    }

    /// Build state around an already-constructed store.
    pub fn with_store(config: ServerConfig, store: Arc<dyn GameStore>) -> Self {
        let db = GameDatabase::new(store, config.catalog.category_set())
            .with_max_page_limit(config.limits.max_page_limit);
        Self {
            db: Arc::new(db),
            config: Arc::new(config),
        }
    }
}
