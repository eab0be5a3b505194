use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

use super::model::FundingSourceDB;
use crate::charges::is_regenerable;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{funding_sources, monthly_charges, projects};
use crate::utils::{chunk_for_sqlite, parse_decimal};
use procat_core::errors::Result;
use procat_core::funding::{FundingRepositoryTrait, FundingSource, NewFundingSource};

pub struct FundingRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl FundingRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        FundingRepository { pool, writer }
    }
}

/// Sums the charges of each funding source in `funding_ids`.
///
/// With `regenerating` set, charges that a regeneration of that period would
/// delete are left out.
fn charged_totals(
    conn: &mut SqliteConnection,
    funding_ids: &[String],
    regenerating: Option<NaiveDate>,
) -> Result<HashMap<String, Decimal>> {
    let mut totals: HashMap<String, Decimal> = HashMap::new();
    for chunk in chunk_for_sqlite(funding_ids) {
        let rows: Vec<(String, String, NaiveDate, String, String)> = monthly_charges::table
            .inner_join(projects::table)
            .filter(monthly_charges::funding_id.eq_any(chunk))
            .select((
                monthly_charges::funding_id,
                monthly_charges::amount,
                monthly_charges::date,
                monthly_charges::status,
                projects::charging,
            ))
            .load(conn)
            .map_err(StorageError::from)?;

        for (funding_id, amount, date, status, charging) in rows {
            if regenerating.is_some_and(|start| is_regenerable(&status, date, &charging, start)) {
                continue;
            }
            *totals.entry(funding_id).or_default() += parse_decimal(&amount, "amount")?;
        }
    }
    Ok(totals)
}

/// Turns funding rows into domain sources with their charged totals.
pub(crate) fn load_funding(
    conn: &mut SqliteConnection,
    rows: Vec<FundingSourceDB>,
    regenerating: Option<NaiveDate>,
) -> Result<Vec<FundingSource>> {
    let ids: Vec<String> = rows.iter().map(|row| row.id.clone()).collect();
    let totals = charged_totals(conn, &ids, regenerating)?;
    rows.into_iter()
        .map(|row| -> Result<FundingSource> {
            let charged = totals.get(&row.id).copied().unwrap_or(Decimal::ZERO);
            Ok(row.into_domain(charged)?)
        })
        .collect()
}

#[async_trait]
impl FundingRepositoryTrait for FundingRepository {
    fn get_by_id(&self, funding_id: &str) -> Result<FundingSource> {
        let mut conn = get_connection(&self.pool)?;
        let row = funding_sources::table
            .find(funding_id)
            .select(FundingSourceDB::as_select())
            .first::<FundingSourceDB>(&mut conn)
            .map_err(StorageError::from)?;
        let mut sources = load_funding(&mut conn, vec![row], None)?;
        sources
            .pop()
            .ok_or_else(|| StorageError::from(diesel::result::Error::NotFound).into())
    }

    fn list_by_project(&self, project_id: &str) -> Result<Vec<FundingSource>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = funding_sources::table
            .filter(funding_sources::project_id.eq(project_id))
            .select(FundingSourceDB::as_select())
            .order((funding_sources::expiry_date.asc(), funding_sources::id.asc()))
            .load::<FundingSourceDB>(&mut conn)
            .map_err(StorageError::from)?;
        load_funding(&mut conn, rows, None)
    }

    fn list(&self) -> Result<Vec<FundingSource>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = funding_sources::table
            .select(FundingSourceDB::as_select())
            .order((funding_sources::project_id.asc(), funding_sources::expiry_date.asc()))
            .load::<FundingSourceDB>(&mut conn)
            .map_err(StorageError::from)?;
        load_funding(&mut conn, rows, None)
    }

    async fn create(&self, new_funding: NewFundingSource) -> Result<FundingSource> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<FundingSource> {
                let row: FundingSourceDB = new_funding.into();
                let result = diesel::insert_into(funding_sources::table)
                    .values(&row)
                    .returning(FundingSourceDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(result.into_domain(Decimal::ZERO)?)
            })
            .await
    }
}
