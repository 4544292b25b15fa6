use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use gamedex_core::model::{CategoryOption, Game, GameCreateRequest, GameFilters, GameUpdateRequest};

use crate::error::AppError;
use crate::state::AppState;

/// Response for `GET /games`.
#[derive(Debug, Serialize)]
pub struct GameListResponse {
    pub games: Vec<Game>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

/// Request body for `DELETE /games`.
#[derive(Debug, Deserialize)]
pub struct DeleteGamesBody {
    pub ids: Option<Vec<String>>,
}

/// Response for both delete endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteGamesResponse {
    pub success: bool,
    pub deleted_count: usize,
    pub message: String,
}

impl DeleteGamesResponse {
    fn new(success: bool, deleted_count: usize) -> Self {
        Self {
            success,
            deleted_count,
            message: format!("{deleted_count} games deleted successfully"),
        }
    }
}

fn bad_body(rejection: JsonRejection) -> AppError {
    AppError::BadRequest(rejection.body_text())
}

/// GET /games: search, filter, and paginate.
pub async fn list_games(
    State(state): State<AppState>,
    query: Result<Query<GameFilters>, QueryRejection>,
) -> Result<Json<GameListResponse>, AppError> {
    let Query(filters) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let (page, pagination) = state.db.search_games(&filters).await?;
    Ok(Json(GameListResponse {
        games: page.games,
        total: page.total,
        page: pagination.page,
        limit: pagination.limit,
    }))
}

/// GET /games/{id}
pub async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Game>, AppError> {
    state
        .db
        .get_game_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Game not found".to_string()))
}

/// POST /games
pub async fn create_game(
    State(state): State<AppState>,
    body: Result<Json<GameCreateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Game>), AppError> {
    let Json(req) = body.map_err(bad_body)?;
    let game = state.db.create_game(req).await?;
    Ok((StatusCode::CREATED, Json(game)))
}

/// PUT /games/{id}: shallow-merge `category` and/or `name`.
pub async fn update_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<GameUpdateRequest>, JsonRejection>,
) -> Result<Json<Game>, AppError> {
    let Json(req) = body.map_err(bad_body)?;
    Ok(Json(state.db.update_game(&id, req).await?))
}

/// DELETE /games: batch delete by `{ "ids": [...] }`.
pub async fn delete_games(
    State(state): State<AppState>,
    body: Result<Json<DeleteGamesBody>, JsonRejection>,
) -> Result<Json<DeleteGamesResponse>, AppError> {
    let ids = body
        .ok()
        .and_then(|Json(b)| b.ids)
        .ok_or_else(|| AppError::BadRequest("ids array is required".to_string()))?;
    let deleted = state.db.delete_games(&ids).await?;
    Ok(Json(DeleteGamesResponse::new(true, deleted)))
}

/// DELETE /games/{id}
pub async fn delete_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteGamesResponse>, AppError> {
    let deleted = state.db.delete_game(&id).await?;
    Ok(Json(DeleteGamesResponse::new(deleted, usize::from(deleted))))
}

/// GET /categories
pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<CategoryOption>> {
    Json(state.db.categories().options().to_vec())
}
