use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use std::sync::Arc;

use super::capacity_model::{Capacity, NewCapacity, TimeseriesPoint};
use super::capacity_timeseries::{capacity_timeseries, effort_timeseries, ProjectEffort};
use super::capacity_traits::{CapacityRepositoryTrait, CapacityServiceTrait};
use crate::errors::{Result, ValidationError};
use crate::events::{DomainEvent, DomainEventSink};
use crate::funding::FundingRepositoryTrait;
use crate::projects::ProjectRepositoryTrait;
use crate::settings::SettingsServiceTrait;

pub struct CapacityService {
    repository: Arc<dyn CapacityRepositoryTrait>,
    project_repository: Arc<dyn ProjectRepositoryTrait>,
    funding_repository: Arc<dyn FundingRepositoryTrait>,
    settings_service: Arc<dyn SettingsServiceTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl CapacityService {
    pub fn new(
        repository: Arc<dyn CapacityRepositoryTrait>,
        project_repository: Arc<dyn ProjectRepositoryTrait>,
        funding_repository: Arc<dyn FundingRepositoryTrait>,
        settings_service: Arc<dyn SettingsServiceTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            repository,
            project_repository,
            funding_repository,
            settings_service,
            event_sink,
        }
    }
}

fn check_window(start: NaiveDate, end: NaiveDate) -> Result<()> {
    if end < start {
        return Err(ValidationError::InvalidInput(format!(
            "Timeseries end {end} is before its start {start}."
        ))
        .into());
    }
    Ok(())
}

#[async_trait]
impl CapacityServiceTrait for CapacityService {
    async fn create_capacity(&self, new_capacity: NewCapacity) -> Result<Capacity> {
        new_capacity.validate()?;
        let capacity = self.repository.create(new_capacity).await?;
        debug!("{}", capacity);
        self.event_sink
            .emit(DomainEvent::capacity_changed(capacity.user_id.clone()));
        Ok(capacity)
    }

    fn get_capacity_timeseries(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TimeseriesPoint>> {
        check_window(start, end)?;
        let capacities = self.repository.list_starting_before(end)?;
        Ok(capacity_timeseries(&capacities, start, end))
    }

    fn get_effort_timeseries(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TimeseriesPoint>> {
        check_window(start, end)?;
        let settings = self.settings_service.get_settings()?;
        let projects = self
            .project_repository
            .list(None)?
            .into_iter()
            .filter(|project| project.overlaps(start, end))
            .map(|project| {
                let funding = self.funding_repository.list_by_project(&project.id)?;
                Ok(ProjectEffort { project, funding })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(effort_timeseries(
            &projects,
            start,
            end,
            settings.working_days_per_year,
        ))
    }
}
