#[cfg(test)]
mod tests {
    use crate::errors::{DatabaseError, Result};
    use crate::events::{DomainEvent, RecordingEventSink};
    use crate::funding::{FundingKind, FundingRepositoryTrait, FundingSource, NewFundingSource};
    use crate::projects::{
        ChargingPolicy, NewProject, Project, ProjectNature, ProjectRepositoryTrait,
        ProjectService, ProjectServiceTrait, ProjectStatus,
    };
    use crate::settings::{Settings, SettingsServiceTrait, SettingsUpdate};
    use crate::utils::FixedClock;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::{Arc, RwLock};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // --- Mock ProjectRepository ---
    #[derive(Default)]
    struct MockProjectRepository {
        projects: RwLock<Vec<Project>>,
    }

    #[async_trait]
    impl ProjectRepositoryTrait for MockProjectRepository {
        fn get_by_id(&self, project_id: &str) -> Result<Project> {
            self.projects
                .read()
                .unwrap()
                .iter()
                .find(|p| p.id == project_id)
                .cloned()
                .ok_or_else(|| DatabaseError::NotFound(project_id.to_string()).into())
        }

        fn list(&self, status_filter: Option<&[ProjectStatus]>) -> Result<Vec<Project>> {
            Ok(self
                .projects
                .read()
                .unwrap()
                .iter()
                .filter(|p| status_filter.map_or(true, |s| s.contains(&p.status)))
                .cloned()
                .collect())
        }

        async fn create(&self, new_project: NewProject) -> Result<Project> {
            let project = Project {
                id: new_project.id.unwrap_or_else(|| "generated".to_string()),
                name: new_project.name,
                nature: new_project.nature,
                pi: new_project.pi,
                department: new_project.department,
                lead: new_project.lead,
                start_date: new_project.start_date,
                end_date: new_project.end_date,
                status: new_project.status,
                charging: new_project.charging,
            };
            self.projects.write().unwrap().push(project.clone());
            Ok(project)
        }

        async fn update(&self, project: Project) -> Result<Project> {
            let mut projects = self.projects.write().unwrap();
            let slot = projects
                .iter_mut()
                .find(|p| p.id == project.id)
                .ok_or_else(|| DatabaseError::NotFound(project.id.clone()))?;
            *slot = project.clone();
            Ok(project)
        }
    }

    // --- Mock FundingRepository ---
    #[derive(Default)]
    struct MockFundingRepository {
        funding: RwLock<Vec<FundingSource>>,
    }

    #[async_trait]
    impl FundingRepositoryTrait for MockFundingRepository {
        fn get_by_id(&self, funding_id: &str) -> Result<FundingSource> {
            self.funding
                .read()
                .unwrap()
                .iter()
                .find(|f| f.id == funding_id)
                .cloned()
                .ok_or_else(|| DatabaseError::NotFound(funding_id.to_string()).into())
        }

        fn list_by_project(&self, project_id: &str) -> Result<Vec<FundingSource>> {
            Ok(self
                .funding
                .read()
                .unwrap()
                .iter()
                .filter(|f| f.project_id == project_id)
                .cloned()
                .collect())
        }

        fn list(&self) -> Result<Vec<FundingSource>> {
            Ok(self.funding.read().unwrap().clone())
        }

        async fn create(&self, new_funding: NewFundingSource) -> Result<FundingSource> {
            let mut funding = self.funding.write().unwrap();
            let source = FundingSource {
                id: new_funding
                    .id
                    .unwrap_or_else(|| format!("f{}", funding.len() + 1)),
                project_id: new_funding.project_id,
                kind: new_funding.kind,
                funding_body: new_funding.funding_body,
                cost_centre: new_funding.cost_centre,
                activity: new_funding.activity,
                analysis_code: new_funding.analysis_code,
                expiry_date: new_funding.expiry_date,
                budget: new_funding.budget,
                daily_rate: new_funding.daily_rate,
                monthly_pro_rata_charge: new_funding.monthly_pro_rata_charge,
                charged: Decimal::ZERO,
            };
            funding.push(source.clone());
            Ok(source)
        }
    }

    // --- Mock SettingsService ---
    struct MockSettingsService;

    #[async_trait]
    impl SettingsServiceTrait for MockSettingsService {
        fn get_settings(&self) -> Result<Settings> {
            Ok(Settings::default())
        }

        async fn update_settings(&self, _new_settings: &SettingsUpdate) -> Result<()> {
            Ok(())
        }

        fn get_setting_value(&self, key: &str) -> Result<Option<String>> {
            Ok(Settings::default_value(key))
        }

        async fn set_setting_value(&self, _key: &str, _value: &str) -> Result<()> {
            Ok(())
        }
    }

    fn pro_rata_project() -> Project {
        Project {
            id: "p1".to_string(),
            name: "Telescope scheduler".to_string(),
            nature: ProjectNature::Standard,
            pi: "Dr. Okafor".to_string(),
            department: "Physics".to_string(),
            lead: Some("u1".to_string()),
            start_date: Some(date(2025, 3, 15)),
            end_date: Some(date(2025, 7, 8)),
            status: ProjectStatus::Active,
            charging: ChargingPolicy::ProRata,
        }
    }

    fn new_funding(budget: Decimal) -> NewFundingSource {
        NewFundingSource {
            id: None,
            project_id: "p1".to_string(),
            kind: FundingKind::External,
            funding_body: Some("STFC".to_string()),
            cost_centre: Some("centre".to_string()),
            activity: Some("G12345".to_string()),
            analysis_code: Some("1234".to_string()),
            expiry_date: Some(date(2025, 12, 31)),
            budget,
            daily_rate: dec!(389),
            monthly_pro_rata_charge: None,
        }
    }

    fn setup(projects: Vec<Project>) -> (ProjectService, RecordingEventSink) {
        let sink = RecordingEventSink::new();
        let service = ProjectService::new(
            Arc::new(MockProjectRepository {
                projects: RwLock::new(projects),
            }),
            Arc::new(MockFundingRepository::default()),
            Arc::new(MockSettingsService),
            Arc::new(FixedClock(date(2025, 5, 1))),
            Arc::new(sink.clone()),
        );
        (service, sink)
    }

    #[tokio::test]
    async fn test_create_project_validates_and_emits() {
        let (service, sink) = setup(Vec::new());
        let invalid = NewProject {
            id: Some("p9".to_string()),
            name: "Unfinished".to_string(),
            nature: ProjectNature::Support,
            pi: "Dr. Lee".to_string(),
            department: "Chemistry".to_string(),
            lead: None,
            start_date: None,
            end_date: None,
            status: ProjectStatus::Active,
            charging: ChargingPolicy::Actual,
        };
        assert!(service.create_project(invalid.clone()).await.is_err());
        assert!(sink.is_empty());

        let draft = NewProject {
            status: ProjectStatus::Draft,
            ..invalid
        };
        let project = service.create_project(draft).await.unwrap();
        assert_eq!(project.id, "p9");
        assert_eq!(
            sink.events(),
            vec![DomainEvent::projects_changed(vec!["p9".to_string()])]
        );
    }

    #[tokio::test]
    async fn test_add_funding_suggests_pro_rata_charge() {
        let (service, sink) = setup(vec![pro_rata_project()]);
        let funding = service.add_funding_source(new_funding(dec!(5000))).await.unwrap();
        assert_eq!(funding.monthly_pro_rata_charge, Some(dec!(1000)));
        assert_eq!(sink.len(), 1);

        let mut explicit = new_funding(dec!(5000));
        explicit.monthly_pro_rata_charge = Some(dec!(750));
        let funding = service.add_funding_source(explicit).await.unwrap();
        assert_eq!(funding.monthly_pro_rata_charge, Some(dec!(750)));
    }

    #[tokio::test]
    async fn test_add_funding_rejects_expiry_before_start() {
        let (service, _) = setup(vec![pro_rata_project()]);
        let mut funding = new_funding(dec!(5000));
        funding.expiry_date = Some(date(2025, 1, 31));
        assert!(service.add_funding_source(funding).await.is_err());
    }

    #[tokio::test]
    async fn test_add_funding_to_unknown_project_fails() {
        let (service, _) = setup(Vec::new());
        assert!(service.add_funding_source(new_funding(dec!(100))).await.is_err());
    }

    #[tokio::test]
    async fn test_project_summary() {
        let (service, _) = setup(vec![pro_rata_project()]);
        service.add_funding_source(new_funding(dec!(3890))).await.unwrap();

        let summary = service.get_project_summary("p1").unwrap();
        assert_eq!(summary.total_effort, Some(dec!(10)));
        assert_eq!(summary.days_left, Some(dec!(10.0)));
        assert_eq!(summary.percent_effort_left, Some(dec!(100.0)));
        // 2025-05-01 to 2025-07-08 is 68 days.
        assert_eq!(summary.weeks_to_deadline, Some(9));
        assert_eq!(summary.funding_sources.len(), 1);
        assert!(summary.warnings.is_empty());
    }
}
