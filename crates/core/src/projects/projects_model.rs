//! Project domain models.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::DAYS_DECIMAL_PRECISION;
use crate::errors::{Error, Result, ValidationError};
use crate::funding::FundingSource;

/// How the costs of a project are recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ChargingPolicy {
    /// Charged from the time entries logged against the project.
    #[default]
    Actual,
    /// Charged a fixed amount every month.
    #[serde(rename = "Pro-rata")]
    ProRata,
    /// Charges are entered by hand and never generated.
    Manual,
}

impl ChargingPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChargingPolicy::Actual => "Actual",
            ChargingPolicy::ProRata => "Pro-rata",
            ChargingPolicy::Manual => "Manual",
        }
    }
}

impl fmt::Display for ChargingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChargingPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Actual" => Ok(ChargingPolicy::Actual),
            "Pro-rata" => Ok(ChargingPolicy::ProRata),
            "Manual" => Ok(ChargingPolicy::Manual),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown charging method '{other}'"
            ))
            .into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProjectStatus {
    #[default]
    Draft,
    #[serde(rename = "Not started")]
    NotStarted,
    Active,
    Completed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Draft => "Draft",
            ProjectStatus::NotStarted => "Not started",
            ProjectStatus::Active => "Active",
            ProjectStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Draft" => Ok(ProjectStatus::Draft),
            "Not started" => Ok(ProjectStatus::NotStarted),
            "Active" => Ok(ProjectStatus::Active),
            "Completed" => Ok(ProjectStatus::Completed),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown project status '{other}'"
            ))
            .into()),
        }
    }
}

/// Support projects are ad hoc work that cannot be planned into sprints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProjectNature {
    Support,
    #[default]
    Standard,
}

impl ProjectNature {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectNature::Support => "Support",
            ProjectNature::Standard => "Standard",
        }
    }
}

impl FromStr for ProjectNature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Support" => Ok(ProjectNature::Support),
            "Standard" => Ok(ProjectNature::Standard),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown project nature '{other}'"
            ))
            .into()),
        }
    }
}

/// Domain model representing a software project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub nature: ProjectNature,
    /// Principal investigator holding the grant.
    pub pi: String,
    pub department: String,
    /// User id of the project lead on the RSE side.
    pub lead: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: ProjectStatus,
    pub charging: ChargingPolicy,
}

/// Input model for creating a new project
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub id: Option<String>,
    pub name: String,
    pub nature: ProjectNature,
    pub pi: String,
    pub department: String,
    pub lead: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: ProjectStatus,
    pub charging: ChargingPolicy,
}

impl NewProject {
    pub fn validate(&self) -> Result<()> {
        check_project_fields(
            &self.name,
            self.status,
            self.lead.as_deref(),
            self.start_date,
            self.end_date,
        )
    }
}

fn check_project_fields(
    name: &str,
    status: ProjectStatus,
    lead: Option<&str>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::MissingField("name".to_string()).into());
    }
    if status == ProjectStatus::Draft {
        return Ok(());
    }
    let (Some(start), Some(end), Some(_)) = (start_date, end_date, lead) else {
        return Err(ValidationError::InvalidInput(
            "All fields are mandatory except if Project status id 'Draft'.".to_string(),
        )
        .into());
    };
    if end <= start {
        return Err(ValidationError::InvalidInput(
            "The end date must be after the start date.".to_string(),
        )
        .into());
    }
    Ok(())
}

impl Project {
    /// Checks that every field is set unless the project is a draft, and
    /// that the end date comes after the start date.
    pub fn validate(&self) -> Result<()> {
        check_project_fields(
            &self.name,
            self.status,
            self.lead.as_deref(),
            self.start_date,
            self.end_date,
        )
    }

    /// Whether the project has both dates and its duration overlaps the
    /// half-open period `[period_start, period_end)`.
    pub fn overlaps(&self, period_start: NaiveDate, period_end: NaiveDate) -> bool {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => start < period_end && end >= period_start,
            _ => false,
        }
    }

    /// Whole weeks left until the end date and the percentage of the total
    /// duration they represent. Only defined for active projects.
    pub fn weeks_to_deadline(&self, today: NaiveDate) -> Option<(i64, Decimal)> {
        if self.status != ProjectStatus::Active {
            return None;
        }
        let (start, end) = (self.start_date?, self.end_date?);
        let total_days = (end - start).num_days();
        if total_days <= 0 {
            return None;
        }
        let left_days = (end - today).num_days();
        let weeks_left = left_days / 7;
        let percent = (Decimal::from(left_days) / Decimal::from(total_days) * dec!(100))
            .round_dp(DAYS_DECIMAL_PRECISION);
        Some((weeks_left, percent))
    }

    /// Working days in the project's duration, assuming
    /// `working_days_per_year` working days in 365 calendar days.
    pub fn total_working_days(&self, working_days_per_year: u32) -> Option<u32> {
        let (start, end) = (self.start_date?, self.end_date?);
        let days = (end - start).num_days().max(0);
        let working = Decimal::from(days) * Decimal::from(working_days_per_year) / dec!(365);
        working.round_dp(0).to_u32()
    }

    /// Total days of effort provided by all funding, or None without funding.
    pub fn total_effort(&self, funding: &[FundingSource]) -> Option<Decimal> {
        if funding.is_empty() {
            return None;
        }
        Some(funding.iter().map(FundingSource::effort).sum())
    }

    /// Days of effort left across all funding and their percentage of the
    /// total effort, both to one decimal place.
    pub fn days_left(&self, funding: &[FundingSource]) -> Option<(Decimal, Decimal)> {
        let total = self.total_effort(funding)?;
        if total <= Decimal::ZERO {
            return None;
        }
        let left: Decimal = funding.iter().map(FundingSource::effort_left).sum();
        Some((
            left.round_dp(DAYS_DECIMAL_PRECISION),
            (left / total * dec!(100)).round_dp(DAYS_DECIMAL_PRECISION),
        ))
    }

    /// Funded days of effort per working day of the project.
    pub fn effort_per_day(
        &self,
        funding: &[FundingSource],
        working_days_per_year: u32,
    ) -> Option<Decimal> {
        let total = self.total_effort(funding)?;
        let working_days = self.total_working_days(working_days_per_year)?;
        if working_days == 0 {
            return None;
        }
        Some(total / Decimal::from(working_days))
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Read model combining a project with its funding-derived metrics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub project: Project,
    pub funding_sources: Vec<FundingSource>,
    pub total_effort: Option<Decimal>,
    pub days_left: Option<Decimal>,
    pub percent_effort_left: Option<Decimal>,
    pub weeks_to_deadline: Option<i64>,
    pub percent_weeks_left: Option<Decimal>,
    pub effort_per_day: Option<Decimal>,
    pub warnings: Vec<String>,
}
