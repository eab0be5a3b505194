use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use super::model::CapacityDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::capacities;
use procat_core::capacity::{Capacity, CapacityRepositoryTrait, NewCapacity};
use procat_core::errors::Result;

pub struct CapacityRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CapacityRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CapacityRepository { pool, writer }
    }
}

fn to_capacities(rows: Vec<CapacityDB>) -> Result<Vec<Capacity>> {
    rows.into_iter()
        .map(|row| Capacity::try_from(row).map_err(Into::into))
        .collect()
}

#[async_trait]
impl CapacityRepositoryTrait for CapacityRepository {
    fn list_starting_before(&self, until: NaiveDate) -> Result<Vec<Capacity>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = capacities::table
            .filter(capacities::start_date.lt(until))
            .select(CapacityDB::as_select())
            .order((capacities::user_id.asc(), capacities::start_date.asc()))
            .load::<CapacityDB>(&mut conn)
            .map_err(StorageError::from)?;
        to_capacities(rows)
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<Capacity>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = capacities::table
            .filter(capacities::user_id.eq(user_id))
            .select(CapacityDB::as_select())
            .order(capacities::start_date.asc())
            .load::<CapacityDB>(&mut conn)
            .map_err(StorageError::from)?;
        to_capacities(rows)
    }

    async fn create(&self, new_capacity: NewCapacity) -> Result<Capacity> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Capacity> {
                let row: CapacityDB = new_capacity.into();
                let result = diesel::insert_into(capacities::table)
                    .values(&row)
                    .returning(CapacityDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Capacity::try_from(result)?)
            })
            .await
    }
}
