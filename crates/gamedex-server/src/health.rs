use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

/// Structured health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub store: StoreInfo,
}

#[derive(Debug, Serialize)]
pub struct StoreInfo {
    pub backend: String,
    pub read_only: bool,
    /// Number of records currently readable, `None` if the load failed.
    pub games: Option<usize>,
}

/// GET /health: reports `degraded` when the store cannot be read.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = state.db.store();
    let games = match state.db.get_all_games().await {
        Ok(games) => Some(games.len()),
        Err(e) => {
            tracing::warn!("Health check could not load games: {e}");
            None
        },
    };

    Json(HealthResponse {
        status: if games.is_some() { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        store: StoreInfo {
            backend: store.describe(),
            read_only: store.is_read_only(),
            games,
        },
    })
}
