use async_trait::async_trait;
use log::{debug, info};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::charges_model::{BillingPeriod, MonthlyCharge, NewMonthlyCharge};
use super::charges_traits::{ChargeRepositoryTrait, ChargesServiceTrait};
use super::period_charge_builder::plan_period_charges;
use crate::errors::Result;
use crate::events::{DomainEvent, DomainEventSink};
use crate::funding::FundingRepositoryTrait;
use crate::projects::ProjectRepositoryTrait;
use crate::report::{render_charges_report, ChargesReport};
use crate::settings::SettingsServiceTrait;
use crate::utils::Clock;

/// Service that regenerates, records and confirms monthly charges.
pub struct ChargesService {
    repository: Arc<dyn ChargeRepositoryTrait>,
    project_repository: Arc<dyn ProjectRepositoryTrait>,
    funding_repository: Arc<dyn FundingRepositoryTrait>,
    settings_service: Arc<dyn SettingsServiceTrait>,
    clock: Arc<dyn Clock>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl ChargesService {
    pub fn new(
        repository: Arc<dyn ChargeRepositoryTrait>,
        project_repository: Arc<dyn ProjectRepositoryTrait>,
        funding_repository: Arc<dyn FundingRepositoryTrait>,
        settings_service: Arc<dyn SettingsServiceTrait>,
        clock: Arc<dyn Clock>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            repository,
            project_repository,
            funding_repository,
            settings_service,
            clock,
            event_sink,
        }
    }

    fn period(&self, month: u32, year: i32) -> Result<BillingPeriod> {
        BillingPeriod::from_month(month, year, self.clock.today())
    }
}

#[async_trait]
impl ChargesServiceTrait for ChargesService {
    async fn create_charges_report(&self, month: u32, year: i32) -> Result<ChargesReport> {
        let period = self.period(month, year)?;
        let settings = self.settings_service.get_settings()?;

        let snapshot = self.repository.load_period_snapshot(&period)?;
        debug!(
            "Loaded {} project(s) for {}",
            snapshot.projects.len(),
            period.label()
        );
        let plan = plan_period_charges(&period, &snapshot, &settings)?;
        let created = self.repository.replace_draft_charges(plan).await?;

        let lines = self.repository.list_charge_lines(period.start)?;
        let report = render_charges_report(&period, &lines, &settings);
        let total: Decimal = lines.iter().map(|line| line.amount).sum();
        info!(
            "Regenerated {} charge(s) for {}; journal total {:.2}",
            created.len(),
            period.label(),
            total
        );

        self.event_sink.emit(DomainEvent::charges_regenerated(
            period.start,
            created.into_iter().map(|c| c.id).collect(),
            total,
        ));
        Ok(report)
    }

    fn get_charges_report(&self, month: u32, year: i32) -> Result<ChargesReport> {
        let period = self.period(month, year)?;
        let settings = self.settings_service.get_settings()?;
        let lines = self.repository.list_charge_lines(period.start)?;
        Ok(render_charges_report(&period, &lines, &settings))
    }

    async fn create_manual_charge(&self, new_charge: NewMonthlyCharge) -> Result<MonthlyCharge> {
        let project = self.project_repository.get_by_id(&new_charge.project_id)?;
        let funding = self.funding_repository.get_by_id(&new_charge.funding_id)?;
        new_charge.validate(&project, &funding)?;

        let charge = self.repository.create_charge(new_charge).await?;
        info!(
            "Recorded charge {} of {:.2} to funding {} for project '{}'",
            charge.id, charge.amount, charge.funding_id, project.name
        );
        self.event_sink.emit(DomainEvent::manual_charge_created(
            charge.id.clone(),
            charge.project_id.clone(),
        ));
        Ok(charge)
    }

    async fn confirm_charges(&self, month: u32, year: i32) -> Result<usize> {
        let period = self.period(month, year)?;
        let confirmed = self.repository.confirm_charges(period.start).await?;
        info!("Confirmed {} charge(s) for {}", confirmed.len(), period.label());
        let count = confirmed.len();
        if count > 0 {
            self.event_sink
                .emit(DomainEvent::charges_confirmed(period.start, confirmed));
        }
        Ok(count)
    }
}
