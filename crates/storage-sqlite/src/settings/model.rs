//! Database model for application settings.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// One stored setting.
#[derive(Queryable, Insertable, Selectable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::app_settings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct AppSettingDB {
    pub setting_key: String,
    pub setting_value: String,
}

impl AppSettingDB {
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            setting_key: key.to_string(),
            setting_value: value.to_string(),
        }
    }
}
