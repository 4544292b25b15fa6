use std::sync::atomic::{AtomicUsize, Ordering};

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::sync::RwLock;

use gamedex_core::model::Game;

use super::{GameStore, StoreError};

/// Keeps the catalog in process memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    games: RwLock<Vec<Game>>,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_games(games: Vec<Game>) -> Self {
        Self {
            games: RwLock::new(games),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of completed `save` calls.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::Relaxed)
    }
}

impl GameStore for MemoryStore {
    fn load(&self) -> BoxFuture<'_, Result<Vec<Game>, StoreError>> {
        async move { Ok(self.games.read().await.clone()) }.boxed()
    }

    fn save<'a>(&'a self, games: &'a [Game]) -> BoxFuture<'a, Result<(), StoreError>> {
        async move {
            *self.games.write().await = games.to_vec();
            self.saves.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }
        .boxed()
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamedex_core::test_helpers::{alpha_catalog, make_game};

    #[tokio::test]
    async fn starts_with_given_games() {
        let store = MemoryStore::with_games(alpha_catalog());
        assert_eq!(store.load().await.unwrap(), alpha_catalog());
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn save_replaces_collection() {
        let store = MemoryStore::new();
        let games = vec![make_game("X", "RPG", "X"), make_game("Y", "FPS", "Y")];
        store.save(&games).await.unwrap();
        assert_eq!(store.load().await.unwrap(), games);
        assert_eq!(store.save_count(), 1);
        assert!(!store.is_read_only());
    }
}
