//! Messages sent to project leads, team members and administrators, and the
//! budget checks that feed them.

mod budget_checks;
mod notification_messages;
mod notifications_model;
mod notifications_service;
mod notifications_traits;

pub use budget_checks::{budget_status, projects_exceeding_budget};
pub use notification_messages::*;
pub use notifications_model::{
    Attachment, BudgetStatus, Notification, OverBudgetProject, ThresholdKind,
};
pub use notifications_service::NotificationService;
pub use notifications_traits::{
    LogNotificationSink, NotificationServiceTrait, NotificationSinkTrait,
};
