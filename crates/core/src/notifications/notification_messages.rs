//! Plain-text bodies and subjects of every notification.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fmt::Write as _;

use super::notifications_model::ThresholdKind;
use crate::constants::{DAYS_DECIMAL_PRECISION, NOTIFICATION_SIGNATURE};

const TIME_TRACKING_LINK: &str = "[Clockify](https://clockify.me/)";

pub fn threshold_subject(project_name: &str) -> String {
    format!("[Project Status Update] {project_name}")
}

/// Tells a project lead that the project crossed an effort or weeks
/// threshold, quoting what is left.
pub fn threshold_message(
    lead_name: &str,
    project_name: &str,
    kind: ThresholdKind,
    threshold: u32,
    value: Decimal,
) -> String {
    format!(
        "\nDear {lead_name},\n\n\
         The project {project_name} has {threshold}% {kind} left ({value} {unit}).\n\
         Please check the project status and update your time spent on it.\n\n\
         Best regards,\n{NOTIFICATION_SIGNATURE}\n",
        unit = kind.unit(),
    )
}

pub fn time_logged_subject(last_month_name: &str) -> String {
    format!("Your Project Time Logged Summary for {last_month_name}")
}

fn one_decimal(value: Decimal) -> String {
    format!("{:.1}", value.round_dp(DAYS_DECIMAL_PRECISION))
}

/// Monthly summary of the hours a user logged per project.
///
/// `project_hours` pairs a project name with its hours. Days are hours over
/// `workday_hours`; the share of time is measured against an average month
/// of `working_days_per_year / 12` working days. Returns None when nothing
/// was logged.
pub fn time_logged_message(
    full_name: &str,
    last_month_name: &str,
    current_month_name: &str,
    project_hours: &[(String, Decimal)],
    workday_hours: u32,
    working_days_per_year: u32,
) -> Option<String> {
    let total_hours: Decimal = project_hours.iter().map(|(_, hours)| *hours).sum();
    if project_hours.is_empty() || total_hours <= Decimal::ZERO || workday_hours == 0 {
        return None;
    }
    let workday_hours = Decimal::from(workday_hours);

    let mut summary = String::new();
    for (name, hours) in project_hours {
        let _ = writeln!(summary, "{name}: {} days", one_decimal(*hours / workday_hours));
    }

    let month_hours = Decimal::from(working_days_per_year) / dec!(12) * workday_hours;
    let percentage = total_hours / month_hours * dec!(100);

    Some(format!(
        "\nDear {full_name},\n\n\
         This is your monthly summary of project work. In {last_month_name} you have logged:\n\n\
         {summary}\n\
         You have invested on project work approximately {percentage}% of your time.\n\n\
         If you have more time to log for {last_month_name}, please do so by the 10th of\n\
         {current_month_name} in {TIME_TRACKING_LINK}.\n\n\
         Best wishes,\n{NOTIFICATION_SIGNATURE}\n",
        percentage = one_decimal(percentage),
    ))
}

pub fn charges_report_subject(month_name: &str) -> String {
    format!("Charges report for {month_name}")
}

pub fn charges_report_message(admin_name: &str, month_name: &str) -> String {
    format!(
        "\nDear {admin_name},\n\n\
         Please find attached the charges report for the last month: {month_name}.\n\n\
         Best regards,\n{NOTIFICATION_SIGNATURE}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effort_threshold_message() {
        let message = threshold_message(
            "Project Lead",
            "TestProject",
            ThresholdKind::Effort,
            50,
            dec!(10),
        );
        assert_eq!(
            message,
            "\nDear Project Lead,\n\n\
             The project TestProject has 50% effort left (10 days).\n\
             Please check the project status and update your time spent on it.\n\n\
             Best regards,\nProCAT\n"
        );
        assert_eq!(threshold_subject("TestProject"), "[Project Status Update] TestProject");
    }

    #[test]
    fn test_weeks_threshold_message() {
        let message =
            threshold_message("Project Lead", "TestProject", ThresholdKind::Weeks, 30, dec!(4));
        assert!(message.contains("has 30% weeks left (4 weeks).\n"));
    }

    #[test]
    fn test_time_logged_summary_for_two_projects() {
        let hours = vec![
            ("Project 1".to_string(), dec!(5)),
            ("Project 2".to_string(), dec!(8)),
        ];
        let message = time_logged_message("Ada Lovelace", "April", "May", &hours, 7, 220).unwrap();
        assert_eq!(
            message,
            "\nDear Ada Lovelace,\n\n\
             This is your monthly summary of project work. In April you have logged:\n\n\
             Project 1: 0.7 days\n\
             Project 2: 1.1 days\n\n\
             You have invested on project work approximately 10.1% of your time.\n\n\
             If you have more time to log for April, please do so by the 10th of\n\
             May in [Clockify](https://clockify.me/).\n\n\
             Best wishes,\nProCAT\n"
        );
    }

    #[test]
    fn test_single_entry_share_of_time() {
        let hours = vec![("Ocean".to_string(), dec!(5))];
        let message = time_logged_message("Ada", "April", "May", &hours, 7, 220).unwrap();
        assert!(message.contains("Ocean: 0.7 days\n"));
        assert!(message.contains("approximately 3.9% of your time"));
    }

    #[test]
    fn test_nothing_logged_gives_no_message() {
        assert!(time_logged_message("Ada", "April", "May", &[], 7, 220).is_none());
    }

    #[test]
    fn test_charges_report_message() {
        assert_eq!(
            charges_report_message("admin user", "June"),
            "\nDear admin user,\n\nPlease find attached the charges report for the last month: June.\n\nBest regards,\nProCAT\n"
        );
        assert_eq!(charges_report_subject("June"), "Charges report for June");
    }
}
