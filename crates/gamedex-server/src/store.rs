mod file;
mod memory;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::BoxFuture;
use serde::Deserialize;

use gamedex_core::model::Game;

use crate::config::{StoreBackend, StoreConfig};

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// What to hand back when none of the candidate files can be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadFallback {
    /// Serve the built-in sample catalog.
    #[default]
    Seed,
    /// Serve an empty catalog.
    Empty,
    /// Surface the failure to the caller.
    Fail,
}

impl std::str::FromStr for ReadFallback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "seed" => Ok(Self::Seed),
            "empty" => Ok(Self::Empty),
            "fail" => Ok(Self::Fail),
            other => Err(format!("unknown read fallback policy: {other}")),
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no readable games file (tried {})", display_paths(.tried))]
    Unreadable { tried: Vec<PathBuf> },
}

impl StoreError {
    pub(crate) fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Backing storage for the whole game collection. Every call reads or
/// replaces the full collection.
pub trait GameStore: Send + Sync {
    fn load(&self) -> BoxFuture<'_, Result<Vec<Game>, StoreError>>;

    /// Replace the stored collection. Read-only stores return `Ok(())`
    /// without writing.
    fn save<'a>(&'a self, games: &'a [Game]) -> BoxFuture<'a, Result<(), StoreError>>;

    /// Short label for logs and the health endpoint.
    fn describe(&self) -> String;

    fn is_read_only(&self) -> bool {
        false
    }
}

/// Build the store selected by the `[store]` config section.
pub fn build_store(config: &StoreConfig) -> Arc<dyn GameStore> {
    match config.backend {
        StoreBackend::File => Arc::new(
            JsonFileStore::new(&config.data_path)
                .with_fallback_paths(config.fallback_paths.clone())
                .with_read_fallback(config.read_fallback)
                .read_only(config.read_only),
        ),
        StoreBackend::Memory => {
            let games = match config.read_fallback {
                ReadFallback::Seed => gamedex_core::seed::seed_games(),
                ReadFallback::Empty | ReadFallback::Fail => Vec::new(),
            };
            Arc::new(MemoryStore::with_games(games))
        },
    }
}
