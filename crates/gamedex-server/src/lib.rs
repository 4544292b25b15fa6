pub mod api;
pub mod config;
pub mod database;
pub mod error;
pub mod health;
pub mod state;
pub mod store;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;

use config::ServerConfig;
use state::AppState;
use store::GameStore;

/// Build the Axum router and application state from a config.
pub fn build_app(config: ServerConfig) -> (Router<()>, AppState) {
    let state = AppState::new(config);
    (router(state.clone()), state)
}

/// Like [`build_app`], but around a caller-supplied store.
pub fn build_app_with_store(
    config: ServerConfig,
    store: Arc<dyn GameStore>,
) -> (Router<()>, AppState) {
    let state = AppState::with_store(config, store);
    (router(state.clone()), state)
}

pub fn router(state: AppState) -> Router<()> {
    let timeout = Duration::from_secs(state.config.limits.request_timeout_secs);

    Router::new()
        .route(
            "/games",
            get(api::list_games)
                .post(api::create_game)
                .delete(api::delete_games),
        )
        .route(
            "/games/{id}",
            get(api::get_game)
                .put(api::update_game)
                .delete(api::delete_game),
        )
        .route("/categories", get(api::list_categories))
        .route("/health", get(health::health_check))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
