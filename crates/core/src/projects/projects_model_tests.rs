//! Tests for project domain models.

#[cfg(test)]
mod tests {
    use crate::funding::{FundingKind, FundingSource};
    use crate::projects::{ChargingPolicy, NewProject, Project, ProjectNature, ProjectStatus};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_project(status: ProjectStatus) -> Project {
        Project {
            id: "p1".to_string(),
            name: "Genome pipeline".to_string(),
            nature: ProjectNature::Standard,
            pi: "Dr. Patel".to_string(),
            department: "Life Sciences".to_string(),
            lead: Some("u1".to_string()),
            start_date: Some(date(2025, 7, 1)),
            end_date: Some(date(2025, 8, 14)),
            status,
            charging: ChargingPolicy::Actual,
        }
    }

    fn create_new_project(status: ProjectStatus) -> NewProject {
        NewProject {
            id: None,
            name: "Genome pipeline".to_string(),
            nature: ProjectNature::Standard,
            pi: "Dr. Patel".to_string(),
            department: "Life Sciences".to_string(),
            lead: None,
            start_date: None,
            end_date: None,
            status,
            charging: ChargingPolicy::Actual,
        }
    }

    fn funding(id: &str, budget: Decimal, charged: Decimal) -> FundingSource {
        FundingSource {
            id: id.to_string(),
            project_id: "p1".to_string(),
            kind: FundingKind::Internal,
            funding_body: None,
            cost_centre: None,
            activity: None,
            analysis_code: None,
            expiry_date: Some(date(2026, 1, 1)),
            budget,
            daily_rate: dec!(100),
            monthly_pro_rata_charge: None,
            charged,
        }
    }

    // ==================== Enum Serialization Tests ====================

    #[test]
    fn test_charging_policy_serialization() {
        assert_eq!(
            serde_json::to_string(&ChargingPolicy::ProRata).unwrap(),
            "\"Pro-rata\""
        );
        assert_eq!(
            serde_json::from_str::<ProjectStatus>("\"Not started\"").unwrap(),
            ProjectStatus::NotStarted
        );
        assert_eq!("Manual".parse::<ChargingPolicy>().unwrap(), ChargingPolicy::Manual);
        assert!("Hourly".parse::<ChargingPolicy>().is_err());
    }

    // ==================== Validation Tests ====================

    #[test]
    fn test_draft_project_needs_only_a_name() {
        assert!(create_new_project(ProjectStatus::Draft).validate().is_ok());

        let mut unnamed = create_new_project(ProjectStatus::Draft);
        unnamed.name = " ".to_string();
        assert!(unnamed.validate().is_err());
    }

    #[test]
    fn test_non_draft_project_requires_dates_and_lead() {
        let err = create_new_project(ProjectStatus::Active)
            .validate()
            .unwrap_err();
        assert!(err
            .to_string()
            .contains("All fields are mandatory except if Project status id 'Draft'."));
    }

    #[test]
    fn test_end_date_must_follow_start_date() {
        let mut project = create_test_project(ProjectStatus::Active);
        project.end_date = project.start_date;
        let err = project.validate().unwrap_err();
        assert!(err.to_string().contains("The end date must be after the start date."));
    }

    // ==================== Period overlap ====================

    #[test]
    fn test_overlaps_half_open_period() {
        let project = create_test_project(ProjectStatus::Active);
        assert!(project.overlaps(date(2025, 7, 1), date(2025, 8, 1)));
        assert!(project.overlaps(date(2025, 8, 1), date(2025, 9, 1)));
        // Starts on the exclusive end of June.
        assert!(!project.overlaps(date(2025, 6, 1), date(2025, 7, 1)));
        assert!(!project.overlaps(date(2025, 9, 1), date(2025, 10, 1)));

        let mut undated = create_test_project(ProjectStatus::Draft);
        undated.end_date = None;
        assert!(!undated.overlaps(date(2025, 7, 1), date(2025, 8, 1)));
    }

    // ==================== Derived metrics ====================

    #[test]
    fn test_total_working_days() {
        let project = create_test_project(ProjectStatus::Active);
        // 44 calendar days * 220 / 365 = 26.5 -> 27
        assert_eq!(project.total_working_days(220), Some(27));
    }

    #[test]
    fn test_total_effort_none_without_funding() {
        let project = create_test_project(ProjectStatus::Active);
        assert_eq!(project.total_effort(&[]), None);
        assert_eq!(project.days_left(&[]), None);
        assert_eq!(project.effort_per_day(&[], 220), None);
    }

    #[test]
    fn test_days_left_and_percentage() {
        let project = create_test_project(ProjectStatus::Active);
        let funding = vec![
            funding("f1", dec!(1000), dec!(250)),
            funding("f2", dec!(500), dec!(0)),
        ];
        assert_eq!(project.total_effort(&funding), Some(dec!(15)));
        assert_eq!(project.days_left(&funding), Some((dec!(12.5), dec!(83.3))));
    }

    #[test]
    fn test_effort_per_day() {
        let project = create_test_project(ProjectStatus::Active);
        let funding = vec![funding("f1", dec!(2700), dec!(0))];
        assert_eq!(project.effort_per_day(&funding, 220), Some(dec!(1)));
    }

    #[test]
    fn test_weeks_to_deadline_only_for_active_projects() {
        let project = create_test_project(ProjectStatus::Active);
        // 22 of 44 days left.
        assert_eq!(
            project.weeks_to_deadline(date(2025, 7, 23)),
            Some((3, dec!(50.0)))
        );

        let project = create_test_project(ProjectStatus::NotStarted);
        assert_eq!(project.weeks_to_deadline(date(2025, 7, 23)), None);
    }
}
