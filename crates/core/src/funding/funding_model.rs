//! Funding source domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{DEFAULT_DAILY_RATE, MONEY_DECIMAL_PRECISION};
use crate::errors::{Error, Result, ValidationError};
use crate::projects::{ChargingPolicy, Project};
use crate::utils::time_utils::calendar_months_spanned;

/// Where the money comes from. Internal funding may omit the accounting
/// fields that external funding must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FundingKind {
    Internal,
    #[default]
    External,
}

impl FundingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FundingKind::Internal => "Internal",
            FundingKind::External => "External",
        }
    }
}

impl fmt::Display for FundingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FundingKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Internal" => Ok(FundingKind::Internal),
            "External" => Ok(FundingKind::External),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown funding source '{other}'"
            ))
            .into()),
        }
    }
}

/// Domain model for one funding source of a project.
///
/// `charged` is the sum of the charges already made against the source. It
/// only ever grows, through charge generation or manual charges.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FundingSource {
    pub id: String,
    pub project_id: String,
    pub kind: FundingKind,
    pub funding_body: Option<String>,
    pub cost_centre: Option<String>,
    pub activity: Option<String>,
    pub analysis_code: Option<String>,
    /// Latest date that charges can be made to the account.
    pub expiry_date: Option<NaiveDate>,
    pub budget: Decimal,
    pub daily_rate: Decimal,
    /// Fixed amount charged every month for Pro-rata projects.
    pub monthly_pro_rata_charge: Option<Decimal>,
    pub charged: Decimal,
}

/// Input model for creating a new funding source
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewFundingSource {
    pub id: Option<String>,
    pub project_id: String,
    pub kind: FundingKind,
    pub funding_body: Option<String>,
    pub cost_centre: Option<String>,
    pub activity: Option<String>,
    pub analysis_code: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub budget: Decimal,
    #[serde(default = "default_daily_rate")]
    pub daily_rate: Decimal,
    pub monthly_pro_rata_charge: Option<Decimal>,
}

/// Daily rate used when a new funding source does not specify one.
pub fn default_daily_rate() -> Decimal {
    Decimal::from_str(DEFAULT_DAILY_RATE).unwrap_or(Decimal::ZERO)
}

impl NewFundingSource {
    /// External funding needs every accounting field; amounts must not be
    /// negative.
    pub fn validate(&self) -> Result<()> {
        if self.kind == FundingKind::External
            && (is_blank(&self.funding_body)
                || is_blank(&self.cost_centre)
                || is_blank(&self.activity)
                || is_blank(&self.analysis_code)
                || self.expiry_date.is_none())
        {
            return Err(ValidationError::InvalidInput(
                "All fields are mandatory except if source is 'Internal'.".to_string(),
            )
            .into());
        }
        if self.budget < Decimal::ZERO {
            return Err(ValidationError::InvalidInput(
                "The budget must not be negative.".to_string(),
            )
            .into());
        }
        if self.daily_rate < Decimal::ZERO {
            return Err(ValidationError::InvalidInput(
                "The daily rate must not be negative.".to_string(),
            )
            .into());
        }
        if matches!(self.monthly_pro_rata_charge, Some(charge) if charge < Decimal::ZERO) {
            return Err(ValidationError::InvalidInput(
                "The monthly pro-rata charge must not be negative.".to_string(),
            )
            .into());
        }
        Ok(())
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

impl FundingSource {
    /// Total days of effort the budget pays for.
    pub fn effort(&self) -> Decimal {
        if self.daily_rate <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.budget / self.daily_rate
    }

    /// Money not yet charged.
    pub fn funding_left(&self) -> Decimal {
        self.budget - self.charged
    }

    /// Days of effort the uncharged money still pays for.
    pub fn effort_left(&self) -> Decimal {
        if self.daily_rate <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.funding_left() / self.daily_rate
    }

    /// Whether the source can still be charged for a period ending (exclusive)
    /// on `period_end`: it must not expire before then and must have effort
    /// left.
    pub fn is_chargeable_until(&self, period_end: NaiveDate) -> bool {
        matches!(self.expiry_date, Some(expiry) if expiry >= period_end)
            && self.effort_left() > Decimal::ZERO
    }

    /// Accounting reference used in charge descriptions, e.g. `centre_G12345`.
    pub fn account_reference(&self) -> String {
        format!(
            "{}_{}",
            self.cost_centre.as_deref().unwrap_or_default(),
            self.activity.as_deref().unwrap_or_default()
        )
    }
}

/// Equal monthly charge that spreads `budget` over every calendar month the
/// project touches. None unless the project is charged Pro-rata and has both
/// dates.
pub fn suggested_monthly_pro_rata_charge(budget: Decimal, project: &Project) -> Option<Decimal> {
    if project.charging != ChargingPolicy::ProRata {
        return None;
    }
    let months = calendar_months_spanned(project.start_date?, project.end_date?);
    if months == 0 {
        return None;
    }
    Some((budget / Decimal::from(months)).round_dp(MONEY_DECIMAL_PRECISION))
}
