//! Database models for monthly charges.

use chrono::NaiveDate;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::StorageError;
use crate::utils::{parse_decimal, parse_enum};
use procat_core::charges::{ChargeStatus, MonthlyCharge, NewMonthlyCharge, TimeEntryLink};
use procat_core::projects::ChargingPolicy;

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::monthly_charges)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct MonthlyChargeDB {
    pub id: String,
    pub project_id: String,
    pub funding_id: String,
    pub amount: String,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub status: String,
}

#[derive(Queryable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::time_entry_charges)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TimeEntryChargeDB {
    pub time_entry_id: String,
    pub charge_id: String,
}

/// Whether regenerating the period starting `period_start` deletes a charge
/// with this status and date made to a project with this charging method.
///
/// Confirmed charges and charges of Manual projects always survive.
pub fn is_regenerable(
    status: &str,
    date: NaiveDate,
    charging: &str,
    period_start: NaiveDate,
) -> bool {
    date == period_start
        && status == ChargeStatus::Draft.as_str()
        && charging != ChargingPolicy::Manual.as_str()
}

impl TryFrom<MonthlyChargeDB> for MonthlyCharge {
    type Error = StorageError;

    fn try_from(db: MonthlyChargeDB) -> Result<Self, Self::Error> {
        Ok(Self {
            amount: parse_decimal(&db.amount, "amount")?,
            status: parse_enum(&db.status, "status")?,
            id: db.id,
            project_id: db.project_id,
            funding_id: db.funding_id,
            date: db.date,
            description: db.description,
        })
    }
}

impl From<MonthlyCharge> for MonthlyChargeDB {
    fn from(domain: MonthlyCharge) -> Self {
        Self {
            id: domain.id,
            project_id: domain.project_id,
            funding_id: domain.funding_id,
            amount: domain.amount.to_string(),
            date: domain.date,
            description: domain.description,
            status: domain.status.as_str().to_string(),
        }
    }
}

impl From<NewMonthlyCharge> for MonthlyChargeDB {
    fn from(domain: NewMonthlyCharge) -> Self {
        Self {
            id: domain
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            project_id: domain.project_id,
            funding_id: domain.funding_id,
            amount: domain.amount.to_string(),
            date: domain.date,
            description: domain.description,
            status: domain.status.as_str().to_string(),
        }
    }
}

impl From<TimeEntryLink> for TimeEntryChargeDB {
    fn from(link: TimeEntryLink) -> Self {
        Self {
            time_entry_id: link.time_entry_id,
            charge_id: link.charge_id,
        }
    }
}
