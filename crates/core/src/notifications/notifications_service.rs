use async_trait::async_trait;
use log::{debug, info, warn};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use super::budget_checks::{budget_status, projects_exceeding_budget};
use super::notification_messages::{
    charges_report_message, charges_report_subject, threshold_message, threshold_subject,
    time_logged_message, time_logged_subject,
};
use super::notifications_model::{
    Attachment, BudgetStatus, Notification, OverBudgetProject, ThresholdKind,
};
use super::notifications_traits::{NotificationServiceTrait, NotificationSinkTrait};
use crate::errors::Result;
use crate::funding::FundingRepositoryTrait;
use crate::projects::{ProjectRepositoryTrait, ProjectStatus};
use crate::report::{download_filename, to_csv_string, ChargesReport};
use crate::settings::SettingsServiceTrait;
use crate::time_entries::{hours_by_project, TimeEntryRepositoryTrait};
use crate::users::UserRepositoryTrait;
use crate::utils::time_utils::{get_current_and_last_month, month_name, month_start};
use crate::utils::Clock;

/// Composes notifications from stored data and hands them to a sink.
pub struct NotificationService {
    sink: Arc<dyn NotificationSinkTrait>,
    user_repository: Arc<dyn UserRepositoryTrait>,
    project_repository: Arc<dyn ProjectRepositoryTrait>,
    funding_repository: Arc<dyn FundingRepositoryTrait>,
    time_entry_repository: Arc<dyn TimeEntryRepositoryTrait>,
    settings_service: Arc<dyn SettingsServiceTrait>,
    clock: Arc<dyn Clock>,
}

impl NotificationService {
    pub fn new(
        sink: Arc<dyn NotificationSinkTrait>,
        user_repository: Arc<dyn UserRepositoryTrait>,
        project_repository: Arc<dyn ProjectRepositoryTrait>,
        funding_repository: Arc<dyn FundingRepositoryTrait>,
        time_entry_repository: Arc<dyn TimeEntryRepositoryTrait>,
        settings_service: Arc<dyn SettingsServiceTrait>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sink,
            user_repository,
            project_repository,
            funding_repository,
            time_entry_repository,
            settings_service,
            clock,
        }
    }
}

#[async_trait]
impl NotificationServiceTrait for NotificationService {
    async fn notify_left_threshold(
        &self,
        project_id: &str,
        kind: ThresholdKind,
        threshold: u32,
        value: Decimal,
    ) -> Result<bool> {
        let project = self.project_repository.get_by_id(project_id)?;
        let Some(lead_id) = project.lead.as_deref() else {
            warn!("Project '{}' has no lead to notify", project.name);
            return Ok(false);
        };
        let lead = self.user_repository.get_by_id(lead_id)?;

        self.sink
            .send(Notification {
                recipient: lead.email.clone(),
                subject: threshold_subject(&project.name),
                body: threshold_message(lead.display_name(), &project.name, kind, threshold, value),
                attachment: None,
            })
            .await?;
        Ok(true)
    }

    async fn send_time_logged_summaries(&self) -> Result<usize> {
        let settings = self.settings_service.get_settings()?;
        let (last_month_start, last_month_name, current_month_start, current_month_name) =
            get_current_and_last_month(self.clock.today());

        let project_names: HashMap<String, String> = self
            .project_repository
            .list(None)?
            .into_iter()
            .map(|project| (project.id, project.name))
            .collect();

        let mut sent = 0;
        for user in self.user_repository.list()? {
            let entries = self.time_entry_repository.list_for_user(
                &user.id,
                last_month_start,
                current_month_start,
            )?;
            let mut by_name: BTreeMap<String, Decimal> = BTreeMap::new();
            for (project_id, hours) in hours_by_project(&entries) {
                let name = project_names.get(&project_id).cloned().unwrap_or(project_id);
                *by_name.entry(name).or_default() += hours;
            }
            let project_hours: Vec<(String, Decimal)> = by_name.into_iter().collect();

            let Some(body) = time_logged_message(
                user.display_name(),
                &last_month_name,
                &current_month_name,
                &project_hours,
                settings.workday_hours,
                settings.working_days_per_year,
            ) else {
                debug!("No time logged by {} in {}", user.username, last_month_name);
                continue;
            };
            self.sink
                .send(Notification {
                    recipient: user.email.clone(),
                    subject: time_logged_subject(&last_month_name),
                    body,
                    attachment: None,
                })
                .await?;
            sent += 1;
        }
        info!("Sent {} time logged summaries for {}", sent, last_month_name);
        Ok(sent)
    }

    async fn send_charges_report(
        &self,
        report: &ChargesReport,
        month: u32,
        year: i32,
    ) -> Result<bool> {
        let Some(admin) = self
            .user_repository
            .list()?
            .into_iter()
            .find(|user| user.is_superuser)
        else {
            warn!("No superuser to send the charges report for {month}/{year} to");
            return Ok(false);
        };
        let name = month_name(month_start(year, month)?);

        self.sink
            .send(Notification {
                recipient: admin.email.clone(),
                subject: charges_report_subject(&name),
                body: charges_report_message(admin.display_name(), &name),
                attachment: Some(Attachment {
                    filename: download_filename(month, year),
                    content_type: "text/csv".to_string(),
                    content: to_csv_string(report)?,
                }),
            })
            .await?;
        Ok(true)
    }

    fn get_budget_status(&self) -> Result<BudgetStatus> {
        let funding = self.funding_repository.list()?;
        Ok(budget_status(&funding, self.clock.today()))
    }

    fn get_projects_exceeding_budget(&self) -> Result<Vec<OverBudgetProject>> {
        let settings = self.settings_service.get_settings()?;
        let (last_month_start, _, current_month_start, _) =
            get_current_and_last_month(self.clock.today());

        let projects = self
            .project_repository
            .list(Some(&[ProjectStatus::Active][..]))?;
        let funding = self.funding_repository.list()?;
        let entries = self
            .time_entry_repository
            .list_for_period(last_month_start, current_month_start)?;

        Ok(projects_exceeding_budget(
            &projects,
            &funding,
            &entries,
            current_month_start,
            settings.workday_hours,
        ))
    }
}
