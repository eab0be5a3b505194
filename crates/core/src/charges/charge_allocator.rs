//! Splits a project's chargeable work across its funding sources.
//!
//! Everything here is pure: the functions take snapshots and return the
//! charges to create together with the funding balances after charging.

use log::{debug, warn};
use rust_decimal::Decimal;

use super::charges_model::{charge_description, BillingPeriod};
use crate::constants::{DAYS_DECIMAL_PRECISION, MONEY_DECIMAL_PRECISION};
use crate::errors::{Result, ValidationError};
use crate::funding::{FundingLedger, FundingSource};
use crate::projects::Project;
use crate::time_entries::TimeEntry;

/// One charge the allocator decided to make.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedCharge {
    pub project_id: String,
    pub funding_id: String,
    pub amount: Decimal,
    pub description: String,
}

/// Result of allocating one project for one period.
#[derive(Debug, Clone, Default)]
pub struct Allocation {
    pub charges: Vec<PlannedCharge>,
    /// Valid funding sources with the new charges applied, in ledger order.
    pub balances: Vec<FundingSource>,
    /// Time entries billed through every charge above.
    pub linked_time_entry_ids: Vec<String>,
    /// Days that could not be placed on any valid funding source.
    pub uncharged_days: Decimal,
}

impl Allocation {
    pub fn total(&self) -> Decimal {
        self.charges.iter().map(|c| c.amount).sum()
    }
}

/// Days of work in `entries`: logged hours over the workday length, to one
/// decimal place. None when nothing was logged.
pub fn chargeable_days(entries: &[TimeEntry], workday_hours: u32) -> Option<Decimal> {
    if entries.is_empty() || workday_hours == 0 {
        return None;
    }
    let hours: Decimal = entries.iter().map(TimeEntry::hours).sum();
    Some((hours / Decimal::from(workday_hours)).round_dp(DAYS_DECIMAL_PRECISION))
}

/// One charge of the fixed monthly amount for every valid source that has
/// one. The remaining budget is not checked.
pub fn allocate_pro_rata(
    project: &Project,
    funding: &[FundingSource],
    period: &BillingPeriod,
    contact: &str,
) -> Allocation {
    let mut ledger = FundingLedger::for_period(funding, period.end);
    let mut charges = Vec::new();

    for position in 0..ledger.len() {
        let source = &ledger.sources()[position];
        let amount = match source.monthly_pro_rata_charge {
            Some(amount) if amount > Decimal::ZERO => amount,
            _ => {
                debug!(
                    "Funding {} of project '{}' has no monthly pro-rata charge",
                    source.id, project.name
                );
                continue;
            }
        };
        charges.push(PlannedCharge {
            project_id: project.id.clone(),
            funding_id: source.id.clone(),
            amount,
            description: charge_description(project, source, period, contact),
        });
        ledger.record_charge(position, amount);
    }

    Allocation {
        charges,
        balances: ledger.into_sources(),
        linked_time_entry_ids: Vec::new(),
        uncharged_days: Decimal::ZERO,
    }
}

/// Charges the days logged in `entries`, drawing down the earliest-expiring
/// funding first.
///
/// A project without funded effort is skipped. Otherwise fails without
/// charging anything when the days exceed the effort left on all of the
/// project's funding, expired or not.
pub fn allocate_actual(
    project: &Project,
    funding: &[FundingSource],
    entries: &[TimeEntry],
    period: &BillingPeriod,
    workday_hours: u32,
    contact: &str,
) -> Result<Allocation> {
    let mut ledger = FundingLedger::for_period(funding, period.end);
    let Some(mut days) = chargeable_days(entries, workday_hours) else {
        return Ok(Allocation {
            balances: ledger.into_sources(),
            ..Allocation::default()
        });
    };

    let total_effort: Decimal = funding.iter().map(FundingSource::effort).sum();
    if total_effort <= Decimal::ZERO {
        debug!(
            "Project '{}' has no funded effort, skipping {} day(s) for {}",
            project.name,
            days,
            period.label()
        );
        return Ok(Allocation {
            balances: ledger.into_sources(),
            ..Allocation::default()
        });
    }

    let effort_left: Decimal = funding.iter().map(FundingSource::effort_left).sum();
    if days > effort_left {
        return Err(ValidationError::EffortExceeded {
            project: project.name.clone(),
            chargeable_days: days,
            effort_left: effort_left.round_dp(DAYS_DECIMAL_PRECISION),
        }
        .into());
    }

    if ledger.is_empty() {
        warn_uncharged(project, period, days);
        return Ok(Allocation {
            uncharged_days: days,
            ..Allocation::default()
        });
    }

    let mut charges = Vec::new();
    for position in 0..ledger.len() {
        if days <= Decimal::ZERO {
            break;
        }
        let source = &ledger.sources()[position];
        let taken = days.min(source.effort_left());
        let amount = (taken * source.daily_rate).round_dp(MONEY_DECIMAL_PRECISION);
        let funding_id = source.id.clone();
        let description = charge_description(project, source, period, contact);

        let charged = ledger.deduct(position, amount);
        days -= taken;
        if charged > Decimal::ZERO {
            charges.push(PlannedCharge {
                project_id: project.id.clone(),
                funding_id,
                amount: charged,
                description,
            });
        }
    }

    let uncharged_days = days.max(Decimal::ZERO);
    if uncharged_days > Decimal::ZERO {
        warn_uncharged(project, period, uncharged_days);
    }

    let linked_time_entry_ids = if charges.is_empty() {
        Vec::new()
    } else {
        entries.iter().map(|e| e.id.clone()).collect()
    };

    Ok(Allocation {
        charges,
        balances: ledger.into_sources(),
        linked_time_entry_ids,
        uncharged_days,
    })
}

fn warn_uncharged(project: &Project, period: &BillingPeriod, days: Decimal) {
    warn!(
        "{} day(s) of project '{}' could not be charged for {}: no valid funding left",
        days,
        project.name,
        period.label()
    );
}
