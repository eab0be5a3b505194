//! Database model for time entries.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use procat_core::time_entries::{NewTimeEntry, TimeEntry};

#[derive(Queryable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::time_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct TimeEntryDB {
    pub id: String,
    pub user_id: String,
    pub project_id: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

impl TimeEntryDB {
    pub fn into_domain(self, charge_ids: Vec<String>) -> TimeEntry {
        TimeEntry {
            id: self.id,
            user_id: self.user_id,
            project_id: self.project_id,
            start_time: self.start_time,
            end_time: self.end_time,
            charge_ids,
        }
    }
}

impl From<NewTimeEntry> for TimeEntryDB {
    fn from(domain: NewTimeEntry) -> Self {
        Self {
            id: domain
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            user_id: domain.user_id,
            project_id: domain.project_id,
            start_time: domain.start_time,
            end_time: domain.end_time,
        }
    }
}
