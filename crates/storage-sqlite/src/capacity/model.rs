//! Database model for capacities.

use chrono::NaiveDate;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::StorageError;
use crate::utils::parse_decimal;
use procat_core::capacity::{Capacity, NewCapacity};

#[derive(Queryable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::capacities)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct CapacityDB {
    pub id: String,
    pub user_id: String,
    pub value: String,
    pub start_date: NaiveDate,
}

impl TryFrom<CapacityDB> for Capacity {
    type Error = StorageError;

    fn try_from(db: CapacityDB) -> Result<Self, Self::Error> {
        Ok(Self {
            value: parse_decimal(&db.value, "value")?,
            id: db.id,
            user_id: db.user_id,
            start_date: db.start_date,
        })
    }
}

impl From<NewCapacity> for CapacityDB {
    fn from(domain: NewCapacity) -> Self {
        Self {
            id: domain
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            user_id: domain.user_id,
            value: domain.value.to_string(),
            start_date: domain.start_date,
        }
    }
}
