//! Charge repository and service traits.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::charges_model::{BillingPeriod, ChargeLine, MonthlyCharge, NewMonthlyCharge};
use super::period_charge_builder::{ChargePlan, PeriodSnapshot};
use crate::errors::Result;
use crate::report::ChargesReport;

/// Trait defining the contract for MonthlyCharge repository operations.
#[async_trait]
pub trait ChargeRepositoryTrait: Send + Sync {
    /// Projects with their funding and unbilled time for `period`, computed as
    /// if the period's draft charges of non-Manual projects were already gone.
    fn load_period_snapshot(&self, period: &BillingPeriod) -> Result<PeriodSnapshot>;

    /// Deletes the regenerable charges of the plan's period, inserts the
    /// planned charges and links their time entries, all in one transaction.
    async fn replace_draft_charges(&self, plan: ChargePlan) -> Result<Vec<MonthlyCharge>>;

    fn list_charges(&self, period_start: NaiveDate) -> Result<Vec<MonthlyCharge>>;

    /// Every charge dated `period_start`, joined with its funding codes.
    fn list_charge_lines(&self, period_start: NaiveDate) -> Result<Vec<ChargeLine>>;

    async fn create_charge(&self, new_charge: NewMonthlyCharge) -> Result<MonthlyCharge>;

    /// Marks the period's draft charges as confirmed and returns their ids.
    async fn confirm_charges(&self, period_start: NaiveDate) -> Result<Vec<String>>;
}

/// Trait defining the contract for charge service operations.
#[async_trait]
pub trait ChargesServiceTrait: Send + Sync {
    /// Regenerates the draft charges of `month`/`year` and renders the
    /// journal for that month.
    async fn create_charges_report(&self, month: u32, year: i32) -> Result<ChargesReport>;

    /// Renders the journal from the charges already stored.
    fn get_charges_report(&self, month: u32, year: i32) -> Result<ChargesReport>;

    async fn create_manual_charge(&self, new_charge: NewMonthlyCharge) -> Result<MonthlyCharge>;

    /// Confirms the draft charges of `month`/`year`. Returns how many changed.
    async fn confirm_charges(&self, month: u32, year: i32) -> Result<usize>;
}
