//! Tests for funding source models.

#[cfg(test)]
mod tests {
    use crate::funding::{
        suggested_monthly_pro_rata_charge, FundingKind, FundingSource, NewFundingSource,
    };
    use crate::projects::{ChargingPolicy, Project, ProjectNature, ProjectStatus};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_funding(budget: Decimal, daily_rate: Decimal, charged: Decimal) -> FundingSource {
        FundingSource {
            id: "f1".to_string(),
            project_id: "p1".to_string(),
            kind: FundingKind::External,
            funding_body: Some("EPSRC".to_string()),
            cost_centre: Some("centre".to_string()),
            activity: Some("G12345".to_string()),
            analysis_code: Some("1234".to_string()),
            expiry_date: Some(date(2026, 3, 31)),
            budget,
            daily_rate,
            monthly_pro_rata_charge: None,
            charged,
        }
    }

    fn create_new_funding(kind: FundingKind) -> NewFundingSource {
        NewFundingSource {
            id: None,
            project_id: "p1".to_string(),
            kind,
            funding_body: Some("EPSRC".to_string()),
            cost_centre: Some("centre".to_string()),
            activity: Some("G12345".to_string()),
            analysis_code: Some("1234".to_string()),
            expiry_date: Some(date(2026, 3, 31)),
            budget: dec!(10000),
            daily_rate: dec!(389),
            monthly_pro_rata_charge: None,
        }
    }

    fn create_test_project(charging: ChargingPolicy) -> Project {
        Project {
            id: "p1".to_string(),
            name: "ProCAT".to_string(),
            nature: ProjectNature::Standard,
            pi: "Dr. Smith".to_string(),
            department: "Physics".to_string(),
            lead: Some("u1".to_string()),
            start_date: Some(date(2025, 3, 15)),
            end_date: Some(date(2025, 7, 8)),
            status: ProjectStatus::Active,
            charging,
        }
    }

    // ==================== Derived amounts ====================

    #[test]
    fn test_effort_and_effort_left() {
        let funding = create_test_funding(dec!(1000), dec!(100), dec!(250));
        assert_eq!(funding.effort(), dec!(10));
        assert_eq!(funding.funding_left(), dec!(750));
        assert_eq!(funding.effort_left(), dec!(7.5));
    }

    #[test]
    fn test_zero_daily_rate_yields_no_effort() {
        let funding = create_test_funding(dec!(1000), Decimal::ZERO, Decimal::ZERO);
        assert_eq!(funding.effort(), Decimal::ZERO);
        assert_eq!(funding.effort_left(), Decimal::ZERO);
        assert!(!funding.is_chargeable_until(date(2025, 7, 1)));
    }

    #[test]
    fn test_account_reference() {
        let funding = create_test_funding(dec!(1000), dec!(100), Decimal::ZERO);
        assert_eq!(funding.account_reference(), "centre_G12345");
    }

    // ==================== Validation ====================

    #[test]
    fn test_external_funding_requires_accounting_fields() {
        let mut funding = create_new_funding(FundingKind::External);
        assert!(funding.validate().is_ok());

        funding.analysis_code = Some("  ".to_string());
        let err = funding.validate().unwrap_err();
        assert!(err.to_string().contains("All fields are mandatory"));
    }

    #[test]
    fn test_internal_funding_may_omit_accounting_fields() {
        let mut funding = create_new_funding(FundingKind::Internal);
        funding.funding_body = None;
        funding.cost_centre = None;
        funding.activity = None;
        funding.analysis_code = None;
        funding.expiry_date = None;
        assert!(funding.validate().is_ok());
    }

    #[test]
    fn test_negative_amounts_rejected() {
        let mut funding = create_new_funding(FundingKind::External);
        funding.budget = dec!(-1);
        assert!(funding.validate().is_err());

        let mut funding = create_new_funding(FundingKind::External);
        funding.daily_rate = dec!(-389);
        assert!(funding.validate().is_err());

        let mut funding = create_new_funding(FundingKind::External);
        funding.monthly_pro_rata_charge = Some(dec!(-5));
        assert!(funding.validate().is_err());
    }

    // ==================== Pro-rata suggestion ====================

    #[test]
    fn test_suggested_pro_rata_spreads_over_spanned_months() {
        let project = create_test_project(ChargingPolicy::ProRata);
        // March to July is five calendar months.
        assert_eq!(
            suggested_monthly_pro_rata_charge(dec!(5000), &project),
            Some(dec!(1000))
        );
        assert_eq!(
            suggested_monthly_pro_rata_charge(dec!(1000), &project),
            Some(dec!(200))
        );
    }

    #[test]
    fn test_suggested_pro_rata_only_for_pro_rata_projects() {
        let project = create_test_project(ChargingPolicy::Actual);
        assert_eq!(suggested_monthly_pro_rata_charge(dec!(5000), &project), None);

        let mut project = create_test_project(ChargingPolicy::ProRata);
        project.end_date = None;
        assert_eq!(suggested_monthly_pro_rata_charge(dec!(5000), &project), None);
    }

    #[test]
    fn test_missing_daily_rate_defaults() {
        let json = r#"{
            "projectId": "p1",
            "kind": "Internal",
            "budget": 1000,
            "monthlyProRataCharge": null
        }"#;
        let funding: NewFundingSource = serde_json::from_str(json).unwrap();
        assert_eq!(funding.daily_rate, dec!(389));
        assert_eq!(funding.id, None);
    }

    #[test]
    fn test_funding_kind_round_trips_through_str() {
        assert_eq!("Internal".parse::<FundingKind>().unwrap(), FundingKind::Internal);
        assert_eq!(FundingKind::External.to_string(), "External");
        assert!("Grant".parse::<FundingKind>().is_err());
    }
}
