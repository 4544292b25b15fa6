use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};

use gamedex_core::model::Game;
use gamedex_server::config::{ServerConfig, StoreBackend};
use gamedex_server::store::{GameStore, MemoryStore};
use gamedex_server::{build_app, build_app_with_store};

pub struct TestServer {
    pub addr: SocketAddr,
    _shutdown: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Start a test server on the memory backend holding `games`.
    pub async fn with_games(games: Vec<Game>) -> Self {
        let store: Arc<dyn GameStore> = Arc::new(MemoryStore::with_games(games));
        let (app, _) = build_app_with_store(ServerConfig::default(), store);
        Self::serve(app).await
    }

    /// Start a test server on the memory backend preloaded with the seed catalog.
    pub async fn seeded() -> Self {
        let mut config = ServerConfig::default();
        config.store.backend = StoreBackend::Memory;
        Self::from_config(config).await
    }

    /// Start a test server backed by a JSON file at `data_path`.
    pub async fn with_file(data_path: &Path, read_only: bool) -> Self {
        let mut config = ServerConfig::default();
        config.store.data_path = data_path.to_path_buf();
        config.store.fallback_paths = Vec::new();
        config.store.read_only = read_only;
        Self::from_config(config).await
    }

    pub async fn from_config(config: ServerConfig) -> Self {
        let (app, _) = build_app(config);
        Self::serve(app).await
    }

    async fn serve(app: axum::Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start accepting
        tokio::time::sleep(Duration::from_millis(20)).await;

        Self {
            addr,
            _shutdown: handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url())
    }
}

/// Create-request JSON with English, Korean and Japanese names.
pub fn game_body(id: &str, category: &str, en: &str) -> Value {
    json!({
        "id": id,
        "category": category,
        "name": [
            { "language": "EN", "value": en },
            { "language": "KO", "value": format!("{en} (KO)") },
            { "language": "JA", "value": format!("{en} (JA)") },
        ],
    })
}

/// A data file path inside `dir` that does not exist yet.
pub fn data_file(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join("data").join("games.json")
}
