//! The monthly reporting run.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::Context;
use procat_core::charges::BillingPeriod;
use procat_core::projects::ProjectStatus;
use procat_core::report::{download_filename, write_to_csv};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::main_lib::AppState;

#[derive(Debug, Clone, PartialEq)]
pub struct ReportOutcome {
    pub csv_path: PathBuf,
    pub charge_rows: usize,
    pub report_sent: bool,
    pub summaries_sent: usize,
}

/// Regenerates the charges of `month`/`year`, writes the journal CSV into
/// `output_dir`, sends the report and the time-logged summaries, and logs
/// funding and project warnings.
pub async fn run_monthly_report(
    state: &AppState,
    month: u32,
    year: i32,
    output_dir: &Path,
) -> anyhow::Result<ReportOutcome> {
    let settings = state.settings_service.get_settings()?;
    info!(
        "Generating charges for {}/{} ({} h workday, {} working days per year)",
        month, year, settings.workday_hours, settings.working_days_per_year
    );

    let report = state
        .charges_service
        .create_charges_report(month, year)
        .await?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("cannot create {}", output_dir.display()))?;
    let csv_path = output_dir.join(download_filename(month, year));
    let file =
        File::create(&csv_path).with_context(|| format!("cannot write {}", csv_path.display()))?;
    write_to_csv(&report, file)?;
    info!(
        "Wrote {} charge row(s) to {}",
        report.charges_block.len(),
        csv_path.display()
    );

    let report_sent = state
        .notification_service
        .send_charges_report(&report, month, year)
        .await?;
    if !report_sent {
        warn!("No superuser to send the charges report to");
    }
    let summaries_sent = state.notification_service.send_time_logged_summaries().await?;
    info!("Sent {} time-logged summaries", summaries_sent);

    log_funding_checks(state)?;
    log_team_load(state, month, year)?;

    Ok(ReportOutcome {
        csv_path,
        charge_rows: report.charges_block.len(),
        report_sent,
        summaries_sent,
    })
}

fn log_funding_checks(state: &AppState) -> anyhow::Result<()> {
    let status = state.notification_service.get_budget_status()?;
    for source in &status.ran_out_not_expired {
        warn!(
            "Funding {} ({}) ran out before its expiry date",
            source.id,
            source.account_reference()
        );
    }
    for source in &status.expired_with_budget_left {
        warn!(
            "Funding {} ({}) expired with {} left",
            source.id,
            source.account_reference(),
            source.funding_left()
        );
    }

    for over in state.notification_service.get_projects_exceeding_budget()? {
        warn!(
            "Project {} logged {:.2} last month against {:.2} of active funding",
            over.project.name, over.logged_cost, over.active_funding_left
        );
    }

    let active = state
        .project_service
        .list_projects(Some(&[ProjectStatus::Active][..]))?;
    for project in active {
        let summary = state.project_service.get_project_summary(&project.id)?;
        for warning in &summary.warnings {
            warn!("Project {}: {}", project.name, warning);
        }
    }
    Ok(())
}

/// Logs the average team capacity against the average funded effort per
/// business day of the reported month.
fn log_team_load(state: &AppState, month: u32, year: i32) -> anyhow::Result<()> {
    let period = BillingPeriod::from_month(month, year, state.clock.today())?;
    let capacity = state
        .capacity_service
        .get_capacity_timeseries(period.start, period.end)?;
    let effort = state
        .capacity_service
        .get_effort_timeseries(period.start, period.end)?;

    let mean = |values: &[Decimal]| {
        if values.is_empty() {
            Decimal::ZERO
        } else {
            values.iter().sum::<Decimal>() / Decimal::from(values.len())
        }
    };
    let capacity: Vec<Decimal> = capacity.into_iter().map(|point| point.value).collect();
    let effort: Vec<Decimal> = effort.into_iter().map(|point| point.value).collect();
    info!(
        "Team capacity {:.2} FTE against {:.2} funded FTE in {}",
        mean(&capacity),
        mean(&effort),
        period.long_label()
    );
    Ok(())
}
