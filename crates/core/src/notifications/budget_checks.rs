use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;

use super::notifications_model::{BudgetStatus, OverBudgetProject};
use crate::funding::FundingSource;
use crate::projects::{Project, ProjectStatus};
use crate::time_entries::TimeEntry;

/// Splits out funding that ran out before its expiry date and funding that
/// expired with money left, as seen on `today`.
pub fn budget_status(funding: &[FundingSource], today: NaiveDate) -> BudgetStatus {
    let mut status = BudgetStatus::default();
    for source in funding {
        let Some(expiry) = source.expiry_date else {
            continue;
        };
        let left = source.funding_left();
        if expiry > today && left <= Decimal::ZERO {
            status.ran_out_not_expired.push(source.clone());
        } else if expiry < today && left > Decimal::ZERO {
            status.expired_with_budget_left.push(source.clone());
        }
    }
    status
}

/// Active projects whose time logged in `[last_month_start,
/// current_month_start)` costs more than the funding still available to
/// them.
///
/// Logged hours are priced at the average daily rate of the project's active
/// funding, i.e. sources with money left that expire on or after
/// `current_month_start`. Projects with no active funding are skipped.
pub fn projects_exceeding_budget(
    projects: &[Project],
    funding: &[FundingSource],
    last_month_entries: &[TimeEntry],
    current_month_start: NaiveDate,
    workday_hours: u32,
) -> Vec<OverBudgetProject> {
    if workday_hours == 0 {
        return Vec::new();
    }
    let mut hours: HashMap<&str, Decimal> = HashMap::new();
    for entry in last_month_entries {
        *hours.entry(entry.project_id.as_str()).or_default() += entry.hours();
    }

    projects
        .iter()
        .filter(|project| project.status == ProjectStatus::Active)
        .filter_map(|project| {
            let logged_hours = *hours.get(project.id.as_str())?;
            if logged_hours <= Decimal::ZERO {
                return None;
            }
            let active: Vec<&FundingSource> = funding
                .iter()
                .filter(|f| f.project_id == project.id)
                .filter(|f| f.expiry_date.is_some_and(|d| d >= current_month_start))
                .filter(|f| f.funding_left() > Decimal::ZERO)
                .collect();
            if active.is_empty() {
                return None;
            }
            let active_funding_left: Decimal = active.iter().map(|f| f.funding_left()).sum();
            let average_rate = active.iter().map(|f| f.daily_rate).sum::<Decimal>()
                / Decimal::from(active.len());
            let logged_cost = logged_hours / Decimal::from(workday_hours) * average_rate;

            (logged_cost > active_funding_left).then(|| OverBudgetProject {
                project: project.clone(),
                logged_cost,
                active_funding_left,
            })
        })
        .collect()
}
