use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use super::model::AppSettingDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::app_settings::dsl::*;
use procat_core::errors::Result;
use procat_core::settings::{Settings, SettingsRepositoryTrait, SettingsUpdate};

pub struct SettingsRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SettingsRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        SettingsRepository { pool, writer }
    }
}

#[async_trait]
impl SettingsRepositoryTrait for SettingsRepository {
    fn get_settings(&self) -> Result<Settings> {
        let mut conn = get_connection(&self.pool)?;
        let stored: Vec<(String, String)> = app_settings
            .select((setting_key, setting_value))
            .load::<(String, String)>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(Settings::from_pairs(stored))
    }

    async fn update_settings(&self, new_settings: &SettingsUpdate) -> Result<()> {
        let rows: Vec<AppSettingDB> = new_settings
            .to_pairs()
            .into_iter()
            .map(|(key, value)| AppSettingDB::new(key, &value))
            .collect();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                for row in &rows {
                    diesel::replace_into(app_settings)
                        .values(row)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(())
            })
            .await
    }

    fn get_setting(&self, key: &str) -> Result<String> {
        let mut conn = get_connection(&self.pool)?;
        let value = app_settings
            .filter(setting_key.eq(key))
            .select(setting_value)
            .first::<String>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(value)
    }

    async fn update_setting(&self, key: &str, value: &str) -> Result<()> {
        let row = AppSettingDB::new(key, value);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::replace_into(app_settings)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}
