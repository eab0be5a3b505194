use super::SettingsRepositoryTrait;
use crate::errors::{DatabaseError, Error, Result};
use crate::settings::{Settings, SettingsUpdate};
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

#[async_trait]
pub trait SettingsServiceTrait: Send + Sync {
    fn get_settings(&self) -> Result<Settings>;

    async fn update_settings(&self, new_settings: &SettingsUpdate) -> Result<()>;

    /// Get a single setting value by key. Returns the default for known keys
    /// that were never stored and None for unknown keys.
    fn get_setting_value(&self, key: &str) -> Result<Option<String>>;

    /// Set a single setting value by key.
    async fn set_setting_value(&self, key: &str, value: &str) -> Result<()>;
}

pub struct SettingsService {
    settings_repository: Arc<dyn SettingsRepositoryTrait>,
}

#[async_trait]
impl SettingsServiceTrait for SettingsService {
    fn get_settings(&self) -> Result<Settings> {
        self.settings_repository.get_settings()
    }

    async fn update_settings(&self, new_settings: &SettingsUpdate) -> Result<()> {
        new_settings.validate()?;
        debug!("Updating settings: {:?}", new_settings.to_pairs());
        self.settings_repository
            .update_settings(new_settings)
            .await
    }

    fn get_setting_value(&self, key: &str) -> Result<Option<String>> {
        match self.settings_repository.get_setting(key) {
            Ok(value) => Ok(Some(value)),
            Err(Error::Database(DatabaseError::NotFound(_))) => Ok(Settings::default_value(key)),
            Err(e) => Err(e),
        }
    }

    async fn set_setting_value(&self, key: &str, value: &str) -> Result<()> {
        // Route known keys through the typed update so they are validated.
        let mut update = SettingsUpdate::default();
        match key {
            super::WORKDAY_HOURS_KEY => update.workday_hours = Some(parse_count(key, value)?),
            super::WORKING_DAYS_PER_YEAR_KEY => {
                update.working_days_per_year = Some(parse_count(key, value)?)
            }
            _ => return self.settings_repository.update_setting(key, value).await,
        }
        self.update_settings(&update).await
    }
}

fn parse_count(key: &str, value: &str) -> Result<u32> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::InvalidConfigValue(format!("{key}={value}")))
}

impl SettingsService {
    pub fn new(settings_repository: Arc<dyn SettingsRepositoryTrait>) -> Self {
        SettingsService {
            settings_repository,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Settings, WORKDAY_HOURS_KEY};
    use std::collections::HashMap;
    use std::sync::RwLock;

    #[derive(Default)]
    struct MockSettingsRepository {
        values: RwLock<HashMap<String, String>>,
    }

    #[async_trait]
    impl SettingsRepositoryTrait for MockSettingsRepository {
        fn get_settings(&self) -> Result<Settings> {
            let values = self.values.read().unwrap().clone();
            Ok(Settings::from_pairs(values))
        }

        async fn update_settings(&self, new_settings: &SettingsUpdate) -> Result<()> {
            let mut values = self.values.write().unwrap();
            for (key, value) in new_settings.to_pairs() {
                values.insert(key.to_string(), value);
            }
            Ok(())
        }

        fn get_setting(&self, setting_key: &str) -> Result<String> {
            self.values
                .read()
                .unwrap()
                .get(setting_key)
                .cloned()
                .ok_or_else(|| DatabaseError::NotFound(setting_key.to_string()).into())
        }

        async fn update_setting(&self, setting_key: &str, setting_value: &str) -> Result<()> {
            self.values
                .write()
                .unwrap()
                .insert(setting_key.to_string(), setting_value.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_update_settings_rejects_invalid_values() {
        let service = SettingsService::new(Arc::new(MockSettingsRepository::default()));
        let update = SettingsUpdate {
            working_days_per_year: Some(0),
            ..Default::default()
        };
        assert!(service.update_settings(&update).await.is_err());
        assert_eq!(service.get_settings().unwrap(), Settings::default());
    }

    #[tokio::test]
    async fn test_get_setting_value_falls_back_to_default() {
        let service = SettingsService::new(Arc::new(MockSettingsRepository::default()));
        assert_eq!(
            service.get_setting_value(WORKDAY_HOURS_KEY).unwrap().as_deref(),
            Some("7")
        );
        assert_eq!(service.get_setting_value("theme").unwrap(), None);

        service.set_setting_value(WORKDAY_HOURS_KEY, "8").await.unwrap();
        assert_eq!(service.get_settings().unwrap().workday_hours, 8);
        assert!(service.set_setting_value(WORKDAY_HOURS_KEY, "seven").await.is_err());
    }
}
