//! # Global Config Repository
//!
//! Single `global_config.yaml` at the root of the data directory:
//!
//! ```yaml
//! theme: "purple"
//! data_format_version: "1.0"
//! created_at: "2025-01-21T19:30:00Z"
//! updated_at: "2025-01-21T19:35:00Z"
//! ```

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::sync::Arc;
use tracing::{debug, info};

use super::connection::CsvConnection;
use crate::storage::traits::SettingsStorage;

pub const DATA_FORMAT_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Selected theme id; None until a parent picks one
    #[serde(default)]
    pub theme: Option<String>,
    pub data_format_version: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            theme: None,
            data_format_version: DATA_FORMAT_VERSION.to_string(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

#[derive(Clone)]
pub struct GlobalConfigRepository {
    connection: Arc<CsvConnection>,
}

impl GlobalConfigRepository {
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        Self { connection }
    }

    /// Read the config, falling back to defaults when the file is missing
    pub fn get_global_config(&self) -> Result<GlobalConfig> {
        let path = self.connection.global_config_path();
        if !path.exists() {
            debug!("Global config not found at {}, using defaults", path.display());
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: GlobalConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    pub fn save_global_config(&self, config: &GlobalConfig) -> Result<()> {
        let mut updated = config.clone();
        updated.updated_at = Utc::now().to_rfc3339();

        let yaml = serde_yaml::to_string(&updated)?;
        self.connection
            .write_atomically(&self.connection.global_config_path(), yaml.as_bytes())?;

        info!("Saved global config (theme: {:?})", updated.theme);
        Ok(())
    }
}

#[async_trait]
impl SettingsStorage for GlobalConfigRepository {
    async fn load_theme(&self) -> Result<Option<String>> {
        Ok(self.get_global_config()?.theme)
    }

    async fn save_theme(&self, theme: &str) -> Result<()> {
        let mut config = self.get_global_config()?;
        config.theme = Some(theme.to_string());
        self.save_global_config(&config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::TestEnvironment;

    #[tokio::test]
    async fn test_missing_config_has_no_theme() {
        let env = TestEnvironment::new().unwrap();
        let repo = GlobalConfigRepository::new(Arc::new(env.connection.clone()));

        assert_eq!(repo.load_theme().await.unwrap(), None);
        assert_eq!(repo.get_global_config().unwrap().data_format_version, "1.0");
    }

    #[tokio::test]
    async fn test_theme_survives_a_new_repository() {
        let env = TestEnvironment::new().unwrap();
        let connection = Arc::new(env.connection.clone());

        GlobalConfigRepository::new(connection.clone())
            .save_theme("pink")
            .await
            .unwrap();

        let reopened = GlobalConfigRepository::new(connection);
        assert_eq!(reopened.load_theme().await.unwrap().as_deref(), Some("pink"));
    }

    #[tokio::test]
    async fn test_save_keeps_created_at() {
        let env = TestEnvironment::new().unwrap();
        let repo = GlobalConfigRepository::new(Arc::new(env.connection.clone()));

        repo.save_theme("green").await.unwrap();
        let created = repo.get_global_config().unwrap().created_at;
        repo.save_theme("purple").await.unwrap();

        assert_eq!(repo.get_global_config().unwrap().created_at, created);
    }
}
