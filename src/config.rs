use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::defaults::{CATALOG_BASE_URL, METADATA_ENDPOINT, USER_AGENTS};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub catalog: CatalogConfig,

    pub metadata: MetadataConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,

    /// Emit logs as JSON lines instead of human-readable text.
    pub json_logs: bool,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            worker_threads: 2,
        }
    }
}

/// Scrape target and the headers sent to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub base_url: String,

    /// One is picked at random for every request.
    pub user_agents: Vec<String>,

    pub request_timeout_seconds: u64,

    /// Minutes east of UTC passed to the schedule endpoint.
    pub schedule_tz_offset: i32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: CATALOG_BASE_URL.to_string(),
            user_agents: USER_AGENTS.iter().map(ToString::to_string).collect(),
            request_timeout_seconds: 10,
            schedule_tz_offset: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    pub endpoint: String,

    pub user_agent: String,

    pub request_timeout_seconds: u64,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            endpoint: METADATA_ENDPOINT.to_string(),
            user_agent: format!("anidex/{}", env!("CARGO_PKG_VERSION")),
            request_timeout_seconds: 5,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("anidex").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".anidex").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    /// Writes the defaults to `path` (or `config.toml`) unless a file is
    /// already there. Returns whether a file was created.
    pub fn create_default_if_missing(path: Option<&Path>) -> Result<bool> {
        let path = path.map_or_else(Self::default_config_path, Path::to_path_buf);
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.catalog.base_url.trim().is_empty() {
            anyhow::bail!("Catalog base URL cannot be empty");
        }

        if self.catalog.user_agents.iter().all(|ua| ua.trim().is_empty()) {
            anyhow::bail!("Catalog user agent pool cannot be empty");
        }

        if self.catalog.request_timeout_seconds == 0 {
            anyhow::bail!("Catalog request timeout must be > 0");
        }

        if self.metadata.endpoint.trim().is_empty() {
            anyhow::bail!("Metadata endpoint cannot be empty");
        }

        if self.metadata.request_timeout_seconds == 0 {
            anyhow::bail!("Metadata request timeout must be > 0");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.general.worker_threads, 2);
        assert_eq!(config.catalog.base_url, "https://hianime.to");
        assert_eq!(config.catalog.user_agents.len(), 3);
        assert_eq!(config.catalog.request_timeout_seconds, 10);
        assert_eq!(config.metadata.endpoint, "https://graphql.anilist.co");
        assert_eq!(config.metadata.request_timeout_seconds, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[catalog]"));
        assert!(toml_str.contains("[metadata]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [catalog]
            base_url = "https://mirror.example"
            schedule_tz_offset = -300
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.catalog.base_url, "https://mirror.example");
        assert_eq!(config.catalog.schedule_tz_offset, -300);

        assert_eq!(config.catalog.user_agents.len(), 3);
        assert_eq!(config.metadata.request_timeout_seconds, 5);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.catalog.user_agents = vec![String::new()];
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.metadata.request_timeout_seconds = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.catalog.base_url = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_create_default_and_load_from_path() {
        let dir = std::env::temp_dir().join(format!("anidex-config-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = std::fs::remove_file(&path);

        assert!(Config::create_default_if_missing(Some(&path)).unwrap());
        assert!(!Config::create_default_if_missing(Some(&path)).unwrap());

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.catalog.base_url, "https://hianime.to");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
