use tracing::{info, warn};

use super::errors::{EngineError, EngineResult};
use super::models::settings::Theme;
use crate::storage::Stores;

/// Persisted color theme. Independent of the progression engine.
#[derive(Clone)]
pub struct ThemeService {
    stores: Stores,
}

impl ThemeService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    /// Stored theme, or the default when none was chosen
    pub async fn get_theme(&self) -> EngineResult<Theme> {
        match self.stores.settings.load_theme().await? {
            Some(value) => Ok(Theme::from_string(&value).unwrap_or_else(|e| {
                warn!("Ignoring stored theme: {}", e);
                Theme::default()
            })),
            None => Ok(Theme::default()),
        }
    }

    pub async fn set_theme(&self, value: &str) -> EngineResult<Theme> {
        let theme = Theme::from_string(value).map_err(EngineError::Validation)?;

        let _guard = self.stores.write_lock.lock().await;
        self.stores.settings.save_theme(theme.as_str()).await?;
        info!("Theme set to {}", theme.as_str());
        Ok(theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::TestEnvironment;

    #[tokio::test]
    async fn test_default_theme_is_blue() {
        let env = TestEnvironment::new().unwrap();
        let service = ThemeService::new(env.stores());

        assert_eq!(service.get_theme().await.unwrap(), Theme::Blue);
    }

    #[tokio::test]
    async fn test_set_theme_persists() {
        let env = TestEnvironment::new().unwrap();
        let service = ThemeService::new(env.stores());

        assert_eq!(service.set_theme(" Purple ").await.unwrap(), Theme::Purple);
        assert_eq!(ThemeService::new(env.stores()).get_theme().await.unwrap(), Theme::Purple);
    }

    #[tokio::test]
    async fn test_unknown_theme_is_rejected() {
        let env = TestEnvironment::new().unwrap();
        let service = ThemeService::new(env.stores());

        assert!(matches!(
            service.set_theme("orange").await,
            Err(EngineError::Validation(_))
        ));
        assert_eq!(service.get_theme().await.unwrap(), Theme::Blue);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_theme_updates_all_succeed() {
        let env = TestEnvironment::new().unwrap();
        let service = ThemeService::new(env.stores());
        let themes = ["blue", "green", "pink", "purple"];

        for _ in 0..10 {
            let handles: Vec<_> = themes
                .iter()
                .copied()
                .map(|theme| {
                    let service = service.clone();
                    tokio::spawn(async move { service.set_theme(theme).await })
                })
                .collect();

            for handle in handles {
                assert!(handle.await.unwrap().is_ok());
            }
        }

        let stored = service.get_theme().await.unwrap();
        assert!(themes.contains(&stored.as_str()));
    }
}
