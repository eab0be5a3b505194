//! Checks that flag projects needing attention.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{Project, ProjectStatus};
use crate::funding::FundingSource;

/// Inputs shared by every project check.
pub struct WarningContext<'a> {
    pub project: &'a Project,
    pub funding: &'a [FundingSource],
    pub today: NaiveDate,
}

type ProjectCheck = fn(&WarningContext) -> Option<String>;

/// Checks in the order their messages are reported.
const PROJECT_CHECKS: &[ProjectCheck] = &[
    warn_missing_lead,
    warn_no_funding,
    warn_funding_exhausted,
    warn_past_deadline,
    warn_funding_expires_before_end,
];

/// Runs every check and returns the messages of those that fired.
pub fn collect_warnings(context: &WarningContext) -> Vec<String> {
    PROJECT_CHECKS
        .iter()
        .filter_map(|check| check(context))
        .collect()
}

fn warn_missing_lead(context: &WarningContext) -> Option<String> {
    (context.project.status == ProjectStatus::Active && context.project.lead.is_none())
        .then(|| "Project is active but has no lead.".to_string())
}

fn warn_no_funding(context: &WarningContext) -> Option<String> {
    (context.project.status != ProjectStatus::Draft && context.funding.is_empty())
        .then(|| "Project has no funding sources.".to_string())
}

fn warn_funding_exhausted(context: &WarningContext) -> Option<String> {
    if context.project.status != ProjectStatus::Active || context.funding.is_empty() {
        return None;
    }
    let left: Decimal = context.funding.iter().map(FundingSource::effort_left).sum();
    (left <= Decimal::ZERO).then(|| "Project is active but has no effort left.".to_string())
}

fn warn_past_deadline(context: &WarningContext) -> Option<String> {
    let end = context.project.end_date?;
    (context.project.status == ProjectStatus::Active && end < context.today).then(|| {
        format!(
            "Project end date ({}) has passed but the project is still active.",
            end.format("%Y-%m-%d")
        )
    })
}

fn warn_funding_expires_before_end(context: &WarningContext) -> Option<String> {
    let end = context.project.end_date?;
    let expiring = context
        .funding
        .iter()
        .filter(|f| f.funding_left() > Decimal::ZERO)
        .filter(|f| matches!(f.expiry_date, Some(expiry) if expiry < end))
        .count();
    (expiring > 0).then(|| {
        format!("{expiring} funding source(s) with money left expire before the project ends.")
    })
}
