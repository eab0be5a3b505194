use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::collections::HashMap;
use std::sync::Arc;

use super::model::TimeEntryDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{time_entries, time_entry_charges};
use crate::utils::chunk_for_sqlite;
use procat_core::errors::Result;
use procat_core::time_entries::{NewTimeEntry, TimeEntry, TimeEntryRepositoryTrait};

pub struct TimeEntryRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TimeEntryRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        TimeEntryRepository { pool, writer }
    }
}

/// Midnight at the start of `date`.
pub(crate) fn day_start(date: NaiveDate) -> NaiveDateTime {
    date.and_time(chrono::NaiveTime::MIN)
}

/// Turns entry rows into domain entries with the ids of the charges they
/// are linked to.
pub(crate) fn load_entries(
    conn: &mut SqliteConnection,
    rows: Vec<TimeEntryDB>,
) -> Result<Vec<TimeEntry>> {
    let ids: Vec<String> = rows.iter().map(|row| row.id.clone()).collect();
    let mut links: HashMap<String, Vec<String>> = HashMap::new();
    for chunk in chunk_for_sqlite(&ids) {
        let pairs: Vec<(String, String)> = time_entry_charges::table
            .filter(time_entry_charges::time_entry_id.eq_any(chunk))
            .select((time_entry_charges::time_entry_id, time_entry_charges::charge_id))
            .load(conn)
            .map_err(StorageError::from)?;
        for (entry_id, charge_id) in pairs {
            links.entry(entry_id).or_default().push(charge_id);
        }
    }
    Ok(rows
        .into_iter()
        .map(|row| {
            let charge_ids = links.remove(&row.id).unwrap_or_default();
            row.into_domain(charge_ids)
        })
        .collect())
}

#[async_trait]
impl TimeEntryRepositoryTrait for TimeEntryRepository {
    fn list_for_period(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<TimeEntry>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = time_entries::table
            .filter(time_entries::start_time.ge(day_start(start)))
            .filter(time_entries::start_time.lt(day_start(end)))
            .select(TimeEntryDB::as_select())
            .order(time_entries::start_time.asc())
            .load::<TimeEntryDB>(&mut conn)
            .map_err(StorageError::from)?;
        load_entries(&mut conn, rows)
    }

    fn list_for_user(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TimeEntry>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = time_entries::table
            .filter(time_entries::user_id.eq(user_id))
            .filter(time_entries::start_time.ge(day_start(start)))
            .filter(time_entries::start_time.lt(day_start(end)))
            .select(TimeEntryDB::as_select())
            .order(time_entries::start_time.asc())
            .load::<TimeEntryDB>(&mut conn)
            .map_err(StorageError::from)?;
        load_entries(&mut conn, rows)
    }

    async fn create(&self, new_entry: NewTimeEntry) -> Result<TimeEntry> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<TimeEntry> {
                let row: TimeEntryDB = new_entry.into();
                let result = diesel::insert_into(time_entries::table)
                    .values(&row)
                    .returning(TimeEntryDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(result.into_domain(Vec::new()))
            })
            .await
    }
}
