use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Mutex;

use gamedex_core::category::CategorySet;
use gamedex_core::model::{
    Game, GameCreateRequest, GameFilters, GameUpdateRequest, Language, SearchPage,
};
use gamedex_core::query::{self, Pagination};
use gamedex_core::validation::{self, ValidationError};

use crate::store::{GameStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Game not found")]
    NotFound,
    #[error("Game with this ID already exists")]
    Conflict(String),
    #[error("failed to load games: {0}")]
    Load(#[source] StoreError),
    #[error("failed to save games: {0}")]
    Save(#[source] StoreError),
}

/// Data-access layer over a [`GameStore`]. Each operation loads the full
/// collection, works on it in memory, and writes it back whole.
///
/// Mutations hold `write_lock` across their load-modify-save cycle, so
/// writers in this process never interleave. Other processes sharing the
/// same file are not coordinated with.
pub struct GameDatabase {
    store: Arc<dyn GameStore>,
    categories: CategorySet,
    max_page_limit: Option<usize>,
    write_lock: Mutex<()>,
}

impl GameDatabase {
    pub fn new(store: Arc<dyn GameStore>, categories: CategorySet) -> Self {
        Self {
            store,
            categories,
            max_page_limit: None,
            write_lock: Mutex::new(()),
        }
    }

    pub fn with_max_page_limit(mut self, max: Option<usize>) -> Self {
        self.max_page_limit = max;
        self
    }

    pub fn store(&self) -> &dyn GameStore {
        self.store.as_ref()
    }

    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    async fn load(&self) -> Result<Vec<Game>, DatabaseError> {
        self.store.load().await.map_err(DatabaseError::Load)
    }

    async fn persist(&self, games: &[Game]) -> Result<(), DatabaseError> {
        self.store.save(games).await.map_err(DatabaseError::Save)
    }

    pub async fn get_all_games(&self) -> Result<Vec<Game>, DatabaseError> {
        self.load().await
    }

    pub async fn get_game_by_id(&self, id: &str) -> Result<Option<Game>, DatabaseError> {
        let id = validation::require_id(id)?;
        Ok(self.load().await?.into_iter().find(|g| g.id == id))
    }

    /// Filter and paginate. Also returns the effective page coordinates
    /// after defaults and the configured cap were applied.
    pub async fn search_games(
        &self,
        filters: &GameFilters,
    ) -> Result<(SearchPage, Pagination), DatabaseError> {
        let pagination = filters.pagination().capped(self.max_page_limit);
        let games = self.load().await?;
        Ok((query::search(games, filters, pagination), pagination))
    }

    pub async fn create_game(&self, req: GameCreateRequest) -> Result<Game, DatabaseError> {
        let game = validation::validate_create(req, &self.categories)?;

        let _guard = self.write_lock.lock().await;
        let mut games = self.load().await?;
        if games.iter().any(|g| g.id == game.id) {
            return Err(DatabaseError::Conflict(game.id));
        }
        games.push(game.clone());
        self.persist(&games).await?;

        tracing::info!(
            id = %game.id,
            category = %game.category,
            name = game.name_in(Language::En).unwrap_or_default(),
            "Created game"
        );
        Ok(game)
    }

    /// Shallow-merge the supplied fields onto the stored record.
    pub async fn update_game(&self, id: &str, req: GameUpdateRequest) -> Result<Game, DatabaseError> {
        let id = validation::require_id(id)?;
        let patch = validation::validate_update(req, &self.categories)?;

        let _guard = self.write_lock.lock().await;
        let mut games = self.load().await?;
        let game = games
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(DatabaseError::NotFound)?;

        if patch.is_empty() {
            return Ok(game.clone());
        }
        patch.apply(game);
        let updated = game.clone();
        self.persist(&games).await?;

        tracing::info!(id = %updated.id, "Updated game");
        Ok(updated)
    }

    /// Remove one record. `false` if no record had that id.
    pub async fn delete_game(&self, id: &str) -> Result<bool, DatabaseError> {
        Ok(self.delete_games(&[id.to_string()]).await? > 0)
    }

    /// Remove every record whose id is in `ids`. Unknown ids are skipped;
    /// nothing is written when nothing matched.
    pub async fn delete_games(&self, ids: &[String]) -> Result<usize, DatabaseError> {
        let targets: HashSet<&str> = ids.iter().map(String::as_str).collect();

        let _guard = self.write_lock.lock().await;
        let mut games = self.load().await?;
        let before = games.len();
        games.retain(|g| !targets.contains(g.id.as_str()));
        let deleted = before - games.len();

        if deleted > 0 {
            self.persist(&games).await?;
            tracing::info!(deleted, requested = ids.len(), "Deleted games");
        }
        Ok(deleted)
    }
}
