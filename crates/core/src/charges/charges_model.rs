//! Monthly charge domain models.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, Result, ValidationError};
use crate::funding::FundingSource;
use crate::projects::{ChargingPolicy, Project};
use crate::utils::time_utils::{month_name, month_start, next_month_start};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ChargeStatus {
    /// Regenerated on every run for the period.
    #[default]
    Draft,
    /// Sent to finance; never touched by regeneration.
    Confirmed,
}

impl ChargeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChargeStatus::Draft => "Draft",
            ChargeStatus::Confirmed => "Confirmed",
        }
    }
}

impl fmt::Display for ChargeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChargeStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Draft" => Ok(ChargeStatus::Draft),
            "Confirmed" => Ok(ChargeStatus::Confirmed),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown charge status '{other}'"
            ))
            .into()),
        }
    }
}

/// Amount charged to one funding source for one month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCharge {
    pub id: String,
    pub project_id: String,
    pub funding_id: String,
    pub amount: Decimal,
    /// First day of the month charged.
    pub date: NaiveDate,
    pub description: Option<String>,
    pub status: ChargeStatus,
}

/// Input model for a charge entered by hand
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewMonthlyCharge {
    pub id: Option<String>,
    pub project_id: String,
    pub funding_id: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: Option<String>,
    #[serde(default)]
    pub status: ChargeStatus,
}

impl NewMonthlyCharge {
    /// Checks the charge against the project and funding it is made to.
    pub fn validate(&self, project: &Project, funding: &FundingSource) -> Result<()> {
        if funding.project_id != project.id || self.project_id != project.id {
            return Err(ValidationError::InvalidInput(
                "The funding source does not belong to the project.".to_string(),
            )
            .into());
        }
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::InvalidInput(
                "The charge amount must be positive.".to_string(),
            )
            .into());
        }
        let Some(expiry) = funding.expiry_date else {
            return Err(ValidationError::InvalidInput(
                "The funding source has no expiry date.".to_string(),
            )
            .into());
        };
        if self.date > expiry {
            return Err(ValidationError::InvalidInput(format!(
                "The charge date must not be after the funding expiry date ({expiry})."
            ))
            .into());
        }
        if self.amount > funding.funding_left() {
            return Err(ValidationError::InvalidInput(format!(
                "The charge exceeds the funding left ({:.2}).",
                funding.funding_left()
            ))
            .into());
        }
        if project.charging == ChargingPolicy::Manual
            && self.description.as_deref().map_or(true, |d| d.trim().is_empty())
        {
            return Err(ValidationError::MissingField("description".to_string()).into());
        }
        Ok(())
    }
}

/// A charge joined with the accounting codes of its funding, as listed in the
/// debit block of the report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChargeLine {
    pub charge_id: String,
    pub project_name: String,
    pub cost_centre: String,
    pub activity: String,
    pub analysis_code: String,
    pub amount: Decimal,
    pub description: String,
    pub status: ChargeStatus,
}

/// Calendar month being charged, as the half-open range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl BillingPeriod {
    /// Period for `month`/`year`. Months that start after `today` are
    /// rejected.
    pub fn from_month(month: u32, year: i32, today: NaiveDate) -> Result<Self> {
        let start = month_start(year, month)?;
        if start > today {
            return Err(ValidationError::FuturePeriod(start).into());
        }
        Ok(Self::starting(start))
    }

    /// Period beginning on `start`, which must be the first of a month.
    pub fn starting(start: NaiveDate) -> Self {
        Self {
            start,
            end: next_month_start(start),
        }
    }

    pub fn month(&self) -> u32 {
        self.start.month()
    }

    pub fn year(&self) -> i32 {
        self.start.year()
    }

    /// `YYYY-MM`, as used in the journal name.
    pub fn label(&self) -> String {
        self.start.format("%Y-%m").to_string()
    }

    /// `June 2025`, as used in the credit line.
    pub fn long_label(&self) -> String {
        format!("{} {}", month_name(self.start), self.year())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }
}

/// Line description of a generated charge.
pub fn charge_description(
    project: &Project,
    funding: &FundingSource,
    period: &BillingPeriod,
    contact: &str,
) -> String {
    format!(
        "RSE Project {} ({}): {}/{} [{}]",
        project.name,
        funding.account_reference(),
        period.month(),
        period.year(),
        contact
    )
}
