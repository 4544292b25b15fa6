use std::path::{Path, PathBuf};

use serde::Deserialize;

use gamedex_core::category::{CategorySet, default_category_options};
use gamedex_core::model::CategoryOption;

use crate::store::ReadFallback;

/// Default config file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "gamedex.toml";

/// Top-level server configuration, loaded from `gamedex.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub store: StoreConfig,
    pub catalog: CatalogConfig,
    pub limits: LimitsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".to_string(),
            store: StoreConfig::default(),
            catalog: CatalogConfig::default(),
            limits: LimitsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    File,
    Memory,
}

/// Where and how the game collection is persisted.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Canonical data file. Always tried first on load, and the only path written.
    pub data_path: PathBuf,
    /// Extra files tried on load, in order, when `data_path` is unreadable.
    pub fallback_paths: Vec<PathBuf>,
    /// Skip all writes (mutations still succeed from the caller's view).
    pub read_only: bool,
    pub read_fallback: ReadFallback,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::File,
            data_path: PathBuf::from("data/games.json"),
            fallback_paths: vec![
                PathBuf::from(".next/server/chunks/data/games.json"),
                PathBuf::from("public/data/games.json"),
            ],
            read_only: false,
            read_fallback: ReadFallback::Seed,
        }
    }
}

/// Catalog vocabulary.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub categories: Vec<CategoryOption>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            categories: default_category_options(),
        }
    }
}

impl CatalogConfig {
    pub fn category_set(&self) -> CategorySet {
        CategorySet::new(self.categories.clone())
    }
}

/// Request-level limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Upper bound for `limit` on `GET /games`. `None` = unbounded.
    pub max_page_limit: Option<usize>,
    pub request_timeout_secs: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_page_limit: None,
            request_timeout_secs: 30,
        }
    }
}

fn truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl ServerConfig {
    /// Check the configuration, returning the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.listen_addr.parse::<std::net::SocketAddr>().is_err() {
            return Err(format!(
                "listen_addr is not a valid socket address: {}",
                self.listen_addr
            ));
        }
        if self.store.backend == StoreBackend::File && self.store.data_path.as_os_str().is_empty() {
            return Err("store.data_path must not be empty".to_string());
        }

        let categories = self.catalog.category_set();
        if categories.is_empty() {
            return Err("catalog.categories must not be empty".to_string());
        }
        if let Some(dup) = categories.first_duplicate() {
            return Err(format!("catalog.categories has duplicate value {dup}"));
        }
        if let Some(empty) = self.catalog.categories.iter().find(|c| c.value.is_empty()) {
            return Err(format!(
                "catalog.categories entry {:?} has an empty value",
                empty.label
            ));
        }

        if self.limits.max_page_limit == Some(0) {
            return Err("limits.max_page_limit must be > 0".to_string());
        }
        if self.limits.request_timeout_secs == 0 {
            return Err("limits.request_timeout_secs must be > 0".to_string());
        }

        if self.store.backend == StoreBackend::Memory && self.store.read_only {
            tracing::warn!("store.read_only has no effect on the memory backend");
        }
        Ok(())
    }

    /// Load config from `GAMEDEX_CONFIG` (or `gamedex.toml`) if it exists, then
    /// apply environment variable overrides.
    pub fn load() -> Self {
        let path = std::env::var("GAMEDEX_CONFIG")
            .ok()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());
        let mut config = Self::from_file(Path::new(&path));
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Read a TOML config file, falling back to defaults if it is missing or invalid.
    pub fn from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<ServerConfig>(&content) {
                Ok(cfg) => {
                    tracing::info!(path = %path.display(), "Loaded configuration");
                    cfg
                },
                Err(e) => {
                    tracing::warn!(path = %path.display(), "Failed to parse config: {e}, using defaults");
                    ServerConfig::default()
                },
            },
            Err(_) => {
                tracing::info!(path = %path.display(), "No config file found, using defaults");
                ServerConfig::default()
            },
        }
    }

    /// Apply `GAMEDEX_*` overrides. A non-empty `VERCEL` also forces read-only.
    /// `lookup` is `std::env::var` in production and a map in tests.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(addr) = get("GAMEDEX_LISTEN_ADDR") {
            self.listen_addr = addr;
        }
        if let Some(path) = get("GAMEDEX_DATA_PATH") {
            self.store.data_path = PathBuf::from(path);
        }
        if let Some(val) = get("GAMEDEX_READ_ONLY") {
            self.store.read_only = truthy(&val);
        }
        let production =
            get("GAMEDEX_ENV").is_some_and(|env| env.eq_ignore_ascii_case("production"));
        let hosted = get("VERCEL").is_some();
        if production || hosted {
            if !self.store.read_only {
                tracing::info!(production, hosted, "Read-only deployment, store is read-only");
            }
            self.store.read_only = true;
        }
        if let Some(val) = get("GAMEDEX_READ_FALLBACK") {
            match val.parse::<ReadFallback>() {
                Ok(policy) => self.store.read_fallback = policy,
                Err(e) => tracing::warn!("Ignoring GAMEDEX_READ_FALLBACK: {e}"),
            }
        }
        if let Some(val) = get("GAMEDEX_MAX_PAGE_LIMIT")
            && let Ok(n) = val.parse::<usize>()
        {
            self.limits.max_page_limit = Some(n);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn default_config_values() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.listen_addr, "0.0.0.0:3000");
        assert_eq!(cfg.store.backend, StoreBackend::File);
        assert_eq!(cfg.store.data_path, PathBuf::from("data/games.json"));
        assert!(!cfg.store.read_only);
        assert_eq!(cfg.store.read_fallback, ReadFallback::Seed);
        assert_eq!(cfg.catalog.categories.len(), 13);
        assert!(cfg.limits.max_page_limit.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn parse_minimal_toml() {
        let toml_str = r#"
listen_addr = "127.0.0.1:9090"

[store]
data_path = "/var/lib/gamedex/games.json"
read_only = true
"#;
        let cfg: ServerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.listen_addr, "127.0.0.1:9090");
        assert_eq!(
            cfg.store.data_path,
            PathBuf::from("/var/lib/gamedex/games.json")
        );
        assert!(cfg.store.read_only);
        assert_eq!(cfg.store.fallback_paths.len(), 2);
        assert_eq!(cfg.limits.request_timeout_secs, 30);
    }

    #[test]
    fn parse_full_toml() {
        let toml_str = r#"
listen_addr = "0.0.0.0:8080"

[store]
backend = "memory"
fallback_paths = ["a.json", "b.json"]
read_fallback = "fail"

[catalog]
categories = [
    { label = "RPG", value = "RPG" },
    { label = "Shooter", value = "SHOOTER" },
]

[limits]
max_page_limit = 50
request_timeout_secs = 5
"#;
        let cfg: ServerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.store.backend, StoreBackend::Memory);
        assert_eq!(cfg.store.fallback_paths.len(), 2);
        assert_eq!(cfg.store.read_fallback, ReadFallback::Fail);
        let set = cfg.catalog.category_set();
        assert!(set.contains("SHOOTER"));
        assert!(!set.contains("FPS"));
        assert_eq!(cfg.limits.max_page_limit, Some(50));
        assert_eq!(cfg.limits.request_timeout_secs, 5);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_invalid_addr() {
        let cfg = ServerConfig {
            listen_addr: "not-an-address".to_string(),
            ..ServerConfig::default()
        };
        assert!(cfg.validate().unwrap_err().contains("listen_addr"));
    }

    #[test]
    fn validate_rejects_bad_categories() {
        let mut cfg = ServerConfig::default();
        cfg.catalog.categories.clear();
        assert!(cfg.validate().is_err());

        let mut cfg = ServerConfig::default();
        cfg.catalog
            .categories
            .push(CategoryOption::new("Role-playing", "RPG"));
        assert!(cfg.validate().unwrap_err().contains("duplicate value RPG"));

        let mut cfg = ServerConfig::default();
        cfg.catalog.categories.push(CategoryOption::new("Blank", ""));
        assert!(cfg.validate().unwrap_err().contains("empty value"));
    }

    #[test]
    fn validate_rejects_zero_limits() {
        let mut cfg = ServerConfig::default();
        cfg.limits.max_page_limit = Some(0);
        assert!(cfg.validate().is_err());

        let mut cfg = ServerConfig::default();
        cfg.limits.request_timeout_secs = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn env_overrides_apply() {
        let mut cfg = ServerConfig::default();
        cfg.apply_env_overrides(env(&[
            ("GAMEDEX_LISTEN_ADDR", "127.0.0.1:4000"),
            ("GAMEDEX_DATA_PATH", "/tmp/games.json"),
            ("GAMEDEX_READ_ONLY", "true"),
            ("GAMEDEX_READ_FALLBACK", "empty"),
            ("GAMEDEX_MAX_PAGE_LIMIT", "25"),
        ]));
        assert_eq!(cfg.listen_addr, "127.0.0.1:4000");
        assert_eq!(cfg.store.data_path, PathBuf::from("/tmp/games.json"));
        assert!(cfg.store.read_only);
        assert_eq!(cfg.store.read_fallback, ReadFallback::Empty);
        assert_eq!(cfg.limits.max_page_limit, Some(25));
    }

    #[test]
    fn production_env_forces_read_only() {
        let mut cfg = ServerConfig::default();
        cfg.apply_env_overrides(env(&[("GAMEDEX_ENV", "production")]));
        assert!(cfg.store.read_only);

        let mut cfg = ServerConfig::default();
        cfg.apply_env_overrides(env(&[("GAMEDEX_ENV", "development")]));
        assert!(!cfg.store.read_only);
    }

    #[test]
    fn vercel_env_forces_read_only() {
        let mut cfg = ServerConfig::default();
        cfg.apply_env_overrides(env(&[("VERCEL", "1")]));
        assert!(cfg.store.read_only);

        let mut cfg = ServerConfig::default();
        cfg.apply_env_overrides(env(&[("VERCEL", "")]));
        assert!(!cfg.store.read_only);
    }

    #[test]
    fn default_candidates_follow_deployment_layouts() {
        let cfg = ServerConfig::default();
        assert_eq!(
            cfg.store.fallback_paths,
            vec![
                PathBuf::from(".next/server/chunks/data/games.json"),
                PathBuf::from("public/data/games.json"),
            ]
        );
    }

    #[test]
    fn invalid_env_values_are_ignored() {
        let mut cfg = ServerConfig::default();
        cfg.apply_env_overrides(env(&[
            ("GAMEDEX_READ_FALLBACK", "sometimes"),
            ("GAMEDEX_MAX_PAGE_LIMIT", "lots"),
            ("GAMEDEX_LISTEN_ADDR", ""),
        ]));
        assert_eq!(cfg.store.read_fallback, ReadFallback::Seed);
        assert!(cfg.limits.max_page_limit.is_none());
        assert_eq!(cfg.listen_addr, "0.0.0.0:3000");
    }

    #[test]
    fn missing_config_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = ServerConfig::from_file(&dir.path().join("gamedex.toml"));
        assert_eq!(cfg.listen_addr, "0.0.0.0:3000");
    }

    #[test]
    fn config_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gamedex.toml");
        std::fs::write(&path, "listen_addr = \"127.0.0.1:5555\"\n").unwrap();
        let cfg = ServerConfig::from_file(&path);
        assert_eq!(cfg.listen_addr, "127.0.0.1:5555");
    }
}
