use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;

use super::project_warnings::{collect_warnings, WarningContext};
use super::projects_model::{NewProject, Project, ProjectStatus, ProjectSummary};
use super::projects_traits::{ProjectRepositoryTrait, ProjectServiceTrait};
use crate::errors::{Result, ValidationError};
use crate::events::{DomainEvent, DomainEventSink};
use crate::funding::{
    suggested_monthly_pro_rata_charge, FundingRepositoryTrait, FundingSource, NewFundingSource,
};
use crate::settings::SettingsServiceTrait;
use crate::utils::Clock;

/// Service for managing projects and their funding.
pub struct ProjectService {
    repository: Arc<dyn ProjectRepositoryTrait>,
    funding_repository: Arc<dyn FundingRepositoryTrait>,
    settings_service: Arc<dyn SettingsServiceTrait>,
    clock: Arc<dyn Clock>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl ProjectService {
    pub fn new(
        repository: Arc<dyn ProjectRepositoryTrait>,
        funding_repository: Arc<dyn FundingRepositoryTrait>,
        settings_service: Arc<dyn SettingsServiceTrait>,
        clock: Arc<dyn Clock>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            repository,
            funding_repository,
            settings_service,
            clock,
            event_sink,
        }
    }
}

#[async_trait]
impl ProjectServiceTrait for ProjectService {
    fn get_project(&self, project_id: &str) -> Result<Project> {
        self.repository.get_by_id(project_id)
    }

    fn list_projects(&self, status_filter: Option<&[ProjectStatus]>) -> Result<Vec<Project>> {
        self.repository.list(status_filter)
    }

    async fn create_project(&self, new_project: NewProject) -> Result<Project> {
        new_project.validate()?;
        debug!("Creating project '{}'", new_project.name);
        let project = self.repository.create(new_project).await?;
        self.event_sink
            .emit(DomainEvent::projects_changed(vec![project.id.clone()]));
        Ok(project)
    }

    async fn update_project(&self, project: Project) -> Result<Project> {
        project.validate()?;
        let project = self.repository.update(project).await?;
        self.event_sink
            .emit(DomainEvent::projects_changed(vec![project.id.clone()]));
        Ok(project)
    }

    async fn add_funding_source(
        &self,
        mut new_funding: NewFundingSource,
    ) -> Result<FundingSource> {
        new_funding.validate()?;
        let project = self.repository.get_by_id(&new_funding.project_id)?;

        if new_funding.monthly_pro_rata_charge.is_none() {
            new_funding.monthly_pro_rata_charge =
                suggested_monthly_pro_rata_charge(new_funding.budget, &project);
        }
        if let (Some(expiry), Some(start)) = (new_funding.expiry_date, project.start_date) {
            if expiry < start {
                return Err(ValidationError::InvalidInput(
                    "The funding expires before the project starts.".to_string(),
                )
                .into());
            }
        }

        let funding = self.funding_repository.create(new_funding).await?;
        info!(
            "Added funding {} ({} at {}/day) to project '{}'",
            funding.id, funding.budget, funding.daily_rate, project.name
        );
        self.event_sink.emit(DomainEvent::funding_changed(
            project.id.clone(),
            vec![funding.id.clone()],
        ));
        Ok(funding)
    }

    fn get_project_summary(&self, project_id: &str) -> Result<ProjectSummary> {
        let project = self.repository.get_by_id(project_id)?;
        let funding = self.funding_repository.list_by_project(project_id)?;
        let settings = self.settings_service.get_settings()?;
        let today = self.clock.today();

        let days_left = project.days_left(&funding);
        let weeks = project.weeks_to_deadline(today);
        let warnings = collect_warnings(&WarningContext {
            project: &project,
            funding: &funding,
            today,
        });

        Ok(ProjectSummary {
            total_effort: project.total_effort(&funding),
            days_left: days_left.map(|(days, _)| days),
            percent_effort_left: days_left.map(|(_, percent)| percent),
            weeks_to_deadline: weeks.map(|(weeks, _)| weeks),
            percent_weeks_left: weeks.map(|(_, percent)| percent),
            effort_per_day: project.effort_per_day(&funding, settings.working_days_per_year),
            warnings,
            funding_sources: funding,
            project,
        })
    }
}
