//! Repository traits for settings.

use async_trait::async_trait;

use crate::errors::Result;
use crate::settings::{Settings, SettingsUpdate};

/// Repository trait for the key/value settings store.
#[async_trait]
pub trait SettingsRepositoryTrait: Send + Sync {
    /// Get all settings, with defaults for keys that were never stored.
    fn get_settings(&self) -> Result<Settings>;

    /// Update multiple settings at once.
    async fn update_settings(&self, new_settings: &SettingsUpdate) -> Result<()>;

    /// Get a single stored value by key.
    fn get_setting(&self, setting_key: &str) -> Result<String>;

    /// Update a single setting.
    async fn update_setting(&self, setting_key: &str, setting_value: &str) -> Result<()>;
}
