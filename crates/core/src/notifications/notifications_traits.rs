use async_trait::async_trait;
use log::info;
use rust_decimal::Decimal;

use super::notifications_model::{BudgetStatus, Notification, OverBudgetProject, ThresholdKind};
use crate::errors::Result;
use crate::report::ChargesReport;

/// Delivers composed notifications. The transport lives outside the core.
#[async_trait]
pub trait NotificationSinkTrait: Send + Sync {
    async fn send(&self, notification: Notification) -> Result<()>;
}

/// Sink that writes every notification to the log instead of delivering it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotificationSink;

#[async_trait]
impl NotificationSinkTrait for LogNotificationSink {
    async fn send(&self, notification: Notification) -> Result<()> {
        info!(
            "Notification to {}: {} ({} bytes{})",
            notification.recipient,
            notification.subject,
            notification.body.len(),
            notification
                .attachment
                .as_ref()
                .map(|a| format!(", attachment {}", a.filename))
                .unwrap_or_default()
        );
        Ok(())
    }
}

#[async_trait]
pub trait NotificationServiceTrait: Send + Sync {
    /// Tells the lead of a project that it crossed a threshold. Returns false
    /// when the project has no lead to notify.
    async fn notify_left_threshold(
        &self,
        project_id: &str,
        kind: ThresholdKind,
        threshold: u32,
        value: Decimal,
    ) -> Result<bool>;

    /// Sends last month's time-logged summary to every user who logged
    /// time. Returns the number of messages sent.
    async fn send_time_logged_summaries(&self) -> Result<usize>;

    /// Mails a charges report as a CSV attachment to the first superuser.
    /// Returns false when there is no superuser.
    async fn send_charges_report(
        &self,
        report: &ChargesReport,
        month: u32,
        year: i32,
    ) -> Result<bool>;

    fn get_budget_status(&self) -> Result<BudgetStatus>;

    fn get_projects_exceeding_budget(&self) -> Result<Vec<OverBudgetProject>>;
}
