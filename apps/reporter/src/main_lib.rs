use std::sync::Arc;

use procat_core::{
    capacity::{CapacityService, CapacityServiceTrait},
    charges::{ChargesService, ChargesServiceTrait},
    events::{DomainEventSink, LogDomainEventSink},
    notifications::{LogNotificationSink, NotificationService, NotificationServiceTrait},
    projects::{ProjectService, ProjectServiceTrait},
    settings::{SettingsService, SettingsServiceTrait},
    utils::{Clock, SystemClock},
};
use procat_storage_sqlite::{
    capacity::CapacityRepository,
    charges::ChargeRepository,
    db::{self, write_actor},
    funding::FundingRepository,
    projects::ProjectRepository,
    settings::SettingsRepository,
    time_entries::TimeEntryRepository,
    users::UserRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub clock: Arc<dyn Clock>,
    pub settings_service: Arc<dyn SettingsServiceTrait>,
    pub project_service: Arc<dyn ProjectServiceTrait>,
    pub charges_service: Arc<dyn ChargesServiceTrait>,
    pub capacity_service: Arc<dyn CapacityServiceTrait>,
    pub notification_service: Arc<dyn NotificationServiceTrait>,
    pub db_path: String,
}

/// Installs the global subscriber. Records from the `log` facade used by the
/// library crates are forwarded to it.
pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let event_sink: Arc<dyn DomainEventSink> = Arc::new(LogDomainEventSink);

    let settings_repository = Arc::new(SettingsRepository::new(pool.clone(), writer.clone()));
    let project_repository = Arc::new(ProjectRepository::new(pool.clone(), writer.clone()));
    let funding_repository = Arc::new(FundingRepository::new(pool.clone(), writer.clone()));
    let time_entry_repository = Arc::new(TimeEntryRepository::new(pool.clone(), writer.clone()));
    let charge_repository = Arc::new(ChargeRepository::new(pool.clone(), writer.clone()));
    let capacity_repository = Arc::new(CapacityRepository::new(pool.clone(), writer.clone()));
    let user_repository = Arc::new(UserRepository::new(pool.clone(), writer));

    let settings_service: Arc<dyn SettingsServiceTrait> =
        Arc::new(SettingsService::new(settings_repository));

    let project_service: Arc<dyn ProjectServiceTrait> = Arc::new(ProjectService::new(
        project_repository.clone(),
        funding_repository.clone(),
        settings_service.clone(),
        clock.clone(),
        event_sink.clone(),
    ));

    let charges_service: Arc<dyn ChargesServiceTrait> = Arc::new(ChargesService::new(
        charge_repository,
        project_repository.clone(),
        funding_repository.clone(),
        settings_service.clone(),
        clock.clone(),
        event_sink.clone(),
    ));

    let capacity_service: Arc<dyn CapacityServiceTrait> = Arc::new(CapacityService::new(
        capacity_repository,
        project_repository.clone(),
        funding_repository.clone(),
        settings_service.clone(),
        event_sink,
    ));

    let notification_service: Arc<dyn NotificationServiceTrait> =
        Arc::new(NotificationService::new(
            Arc::new(LogNotificationSink),
            user_repository,
            project_repository,
            funding_repository,
            time_entry_repository,
            settings_service.clone(),
            clock.clone(),
        ));

    Ok(Arc::new(AppState {
        clock,
        settings_service,
        project_service,
        charges_service,
        capacity_service,
        notification_service,
        db_path,
    }))
}
