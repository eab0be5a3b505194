//! Plans the charges of a whole period before anything is written.

use log::{debug, info};
use rust_decimal::Decimal;
use serde::Serialize;

use super::charge_allocator::{allocate_actual, allocate_pro_rata, Allocation};
use super::charges_model::{BillingPeriod, ChargeStatus, MonthlyCharge};
use crate::errors::Result;
use crate::funding::FundingSource;
use crate::projects::{ChargingPolicy, Project};
use crate::settings::Settings;
use crate::time_entries::TimeEntry;

/// Everything the planner needs to know about one project.
#[derive(Debug, Clone)]
pub struct ProjectChargingInput {
    pub project: Project,
    pub funding: Vec<FundingSource>,
    /// Entries started within the period that are not billed through any
    /// charge that survives regeneration.
    pub unlinked_entries: Vec<TimeEntry>,
}

/// State of the store for one period, as if its regenerable charges had
/// already been deleted: funding `charged` totals and time entry links leave
/// them out.
#[derive(Debug, Clone, Default)]
pub struct PeriodSnapshot {
    pub projects: Vec<ProjectChargingInput>,
}

/// Link between a time entry and a charge it was billed through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntryLink {
    pub time_entry_id: String,
    pub charge_id: String,
}

/// Writes needed to regenerate a period.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargePlan {
    pub period: BillingPeriod,
    pub charges: Vec<MonthlyCharge>,
    pub time_entry_links: Vec<TimeEntryLink>,
    /// Funding touched by the plan, with the planned charges applied.
    pub balances: Vec<FundingSource>,
}

impl ChargePlan {
    pub fn total(&self) -> Decimal {
        self.charges.iter().map(|c| c.amount).sum()
    }
}

/// Whether a project takes part in automatic charging for `period`.
pub fn is_chargeable_in(project: &Project, period: &BillingPeriod) -> bool {
    project.charging != ChargingPolicy::Manual && project.overlaps(period.start, period.end)
}

/// Allocates every candidate project of the period.
///
/// The first failing project aborts the whole plan, so callers either write
/// all of it or nothing.
pub fn plan_period_charges(
    period: &BillingPeriod,
    snapshot: &PeriodSnapshot,
    settings: &Settings,
) -> Result<ChargePlan> {
    let mut plan = ChargePlan {
        period: *period,
        charges: Vec::new(),
        time_entry_links: Vec::new(),
        balances: Vec::new(),
    };

    for input in &snapshot.projects {
        if !is_chargeable_in(&input.project, period) {
            debug!("Skipping project '{}' for {}", input.project.name, period.label());
            continue;
        }
        let allocation = match input.project.charging {
            ChargingPolicy::ProRata => allocate_pro_rata(
                &input.project,
                &input.funding,
                period,
                &settings.charge_contact,
            ),
            ChargingPolicy::Actual => allocate_actual(
                &input.project,
                &input.funding,
                &input.unlinked_entries,
                period,
                settings.workday_hours,
                &settings.charge_contact,
            )?,
            ChargingPolicy::Manual => continue,
        };
        append_allocation(&mut plan, allocation);
    }

    info!(
        "Planned {} charge(s) totalling {:.2} for {}",
        plan.charges.len(),
        plan.total(),
        period.label()
    );
    Ok(plan)
}

fn append_allocation(plan: &mut ChargePlan, allocation: Allocation) {
    let first_new = plan.charges.len();
    for planned in allocation.charges {
        plan.charges.push(MonthlyCharge {
            id: uuid::Uuid::new_v4().to_string(),
            project_id: planned.project_id,
            funding_id: planned.funding_id,
            amount: planned.amount,
            date: plan.period.start,
            description: Some(planned.description),
            status: ChargeStatus::Draft,
        });
    }
    let new_charges = &plan.charges[first_new..];
    for time_entry_id in &allocation.linked_time_entry_ids {
        for charge in new_charges {
            plan.time_entry_links.push(TimeEntryLink {
                time_entry_id: time_entry_id.clone(),
                charge_id: charge.id.clone(),
            });
        }
    }
    plan.balances.extend(allocation.balances);
}
