//! Database model for funding sources.

use chrono::NaiveDate;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::StorageError;
use crate::utils::{parse_decimal, parse_enum, parse_optional_decimal};
use procat_core::funding::{FundingSource, NewFundingSource};

/// Funding source row. The charged total is not stored; it is summed from
/// the source's charges when the row is read.
#[derive(Queryable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::funding_sources)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct FundingSourceDB {
    pub id: String,
    pub project_id: String,
    pub kind: String,
    pub funding_body: Option<String>,
    pub cost_centre: Option<String>,
    pub activity: Option<String>,
    pub analysis_code: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub budget: String,
    pub daily_rate: String,
    pub monthly_pro_rata_charge: Option<String>,
}

impl FundingSourceDB {
    pub fn into_domain(self, charged: Decimal) -> Result<FundingSource, StorageError> {
        Ok(FundingSource {
            kind: parse_enum(&self.kind, "kind")?,
            budget: parse_decimal(&self.budget, "budget")?,
            daily_rate: parse_decimal(&self.daily_rate, "daily_rate")?,
            monthly_pro_rata_charge: parse_optional_decimal(
                self.monthly_pro_rata_charge.as_deref(),
                "monthly_pro_rata_charge",
            )?,
            id: self.id,
            project_id: self.project_id,
            funding_body: self.funding_body,
            cost_centre: self.cost_centre,
            activity: self.activity,
            analysis_code: self.analysis_code,
            expiry_date: self.expiry_date,
            charged,
        })
    }
}

impl From<NewFundingSource> for FundingSourceDB {
    fn from(domain: NewFundingSource) -> Self {
        Self {
            id: domain
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            project_id: domain.project_id,
            kind: domain.kind.as_str().to_string(),
            funding_body: domain.funding_body,
            cost_centre: domain.cost_centre,
            activity: domain.activity,
            analysis_code: domain.analysis_code,
            expiry_date: domain.expiry_date,
            budget: domain.budget.to_string(),
            daily_rate: domain.daily_rate.to_string(),
            monthly_pro_rata_charge: domain.monthly_pro_rata_charge.map(|d| d.to_string()),
        }
    }
}
