use std::ffi::OsString;
use std::path::{Path, PathBuf};

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::io::AsyncWriteExt;

use gamedex_core::model::Game;
use gamedex_core::seed::seed_games;

use super::{GameStore, ReadFallback, StoreError};

/// Stores the catalog as one pretty-printed JSON array on disk.
///
/// Reads try the canonical `data_path` first, then each fallback path in
/// order. Writes only ever target `data_path`, and go through a sibling
/// temp file plus rename so a crash mid-write leaves the old file intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    data_path: PathBuf,
    fallback_paths: Vec<PathBuf>,
    read_only: bool,
    read_fallback: ReadFallback,
}

impl JsonFileStore {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            fallback_paths: Vec::new(),
            read_only: false,
            read_fallback: ReadFallback::default(),
        }
    }

    pub fn with_fallback_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.fallback_paths = paths;
        self
    }

    pub fn with_read_fallback(mut self, policy: ReadFallback) -> Self {
        self.read_fallback = policy;
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Paths tried on load, in order.
    pub fn candidate_paths(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(self.data_path.as_path()).chain(self.fallback_paths.iter().map(PathBuf::as_path))
    }

    async fn read_candidate(path: &Path) -> Result<Vec<Game>, StoreError> {
        let data = tokio::fs::read_to_string(path)
            .await
            .map_err(StoreError::io(path))?;
        Ok(serde_json::from_str(&data)?)
    }

    async fn load_games(&self) -> Result<Vec<Game>, StoreError> {
        for path in self.candidate_paths() {
            match Self::read_candidate(path).await {
                Ok(games) => {
                    tracing::debug!(path = %path.display(), count = games.len(), "Loaded games");
                    return Ok(games);
                },
                Err(e) => {
                    tracing::debug!(path = %path.display(), "Skipping games file: {e}");
                },
            }
        }

        match self.read_fallback {
            ReadFallback::Seed => {
                tracing::warn!("Could not read games.json, using built-in seed data");
                Ok(seed_games())
            },
            ReadFallback::Empty => {
                tracing::warn!("Could not read games.json, using an empty catalog");
                Ok(Vec::new())
            },
            ReadFallback::Fail => Err(StoreError::Unreadable {
                tried: self.candidate_paths().map(Path::to_path_buf).collect(),
            }),
        }
    }

    async fn save_games(&self, games: &[Game]) -> Result<(), StoreError> {
        if self.read_only {
            tracing::warn!(
                count = games.len(),
                path = %self.data_path.display(),
                "Read-only store, skipping save"
            );
            return Ok(());
        }

        let json = serde_json::to_string_pretty(games)?;

        if let Some(parent) = self.data_path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(StoreError::io(parent))?;
        }

        let tmp = temp_path(&self.data_path);
        if let Err(e) = write_synced(&tmp, json.as_bytes()).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e);
        }
        if let Err(source) = tokio::fs::rename(&tmp, &self.data_path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(StoreError::Io {
                path: self.data_path.clone(),
                source,
            });
        }

        tracing::debug!(count = games.len(), path = %self.data_path.display(), "Saved games");
        Ok(())
    }
}

impl GameStore for JsonFileStore {
    fn load(&self) -> BoxFuture<'_, Result<Vec<Game>, StoreError>> {
        self.load_games().boxed()
    }

    fn save<'a>(&'a self, games: &'a [Game]) -> BoxFuture<'a, Result<(), StoreError>> {
        self.save_games(games).boxed()
    }

    fn describe(&self) -> String {
        format!("file:{}", self.data_path.display())
    }

    fn is_read_only(&self) -> bool {
        self.read_only
    }
}

/// `games.json` -> `games.json.tmp`, in the same directory so the rename
/// stays on one filesystem.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("games.json"));
    name.push(".tmp");
    path.with_file_name(name)
}

async fn write_synced(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let mut file = tokio::fs::File::create(path)
        .await
        .map_err(StoreError::io(path))?;
    file.write_all(bytes).await.map_err(StoreError::io(path))?;
    file.sync_all().await.map_err(StoreError::io(path))?;
    Ok(())
}
