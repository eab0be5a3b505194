use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::model::{is_regenerable, MonthlyChargeDB, TimeEntryChargeDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::funding::{load_funding, FundingSourceDB};
use crate::projects::{to_projects, ProjectDB};
use crate::schema::{funding_sources, monthly_charges, projects, time_entries, time_entry_charges};
use crate::time_entries::{day_start, load_entries, TimeEntryDB};
use crate::utils::{chunk_for_sqlite, parse_decimal, parse_enum};
use procat_core::charges::{
    BillingPeriod, ChargeLine, ChargePlan, ChargeRepositoryTrait, ChargeStatus, MonthlyCharge,
    NewMonthlyCharge, PeriodSnapshot, ProjectChargingInput,
};
use procat_core::errors::Result;
use procat_core::projects::ChargingPolicy;

/// Rows per multi-row insert; monthly charges bind seven parameters each.
const SQLITE_MAX_ROWS_CHUNK: usize = 100;

pub struct ChargeRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ChargeRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ChargeRepository { pool, writer }
    }
}

/// Ids of the charges a regeneration of the period starting `period_start`
/// replaces.
fn regenerable_charge_ids(
    conn: &mut SqliteConnection,
    period_start: NaiveDate,
) -> Result<Vec<String>> {
    let rows: Vec<(String, String, NaiveDate, String)> = monthly_charges::table
        .inner_join(projects::table)
        .filter(monthly_charges::date.eq(period_start))
        .select((
            monthly_charges::id,
            monthly_charges::status,
            monthly_charges::date,
            projects::charging,
        ))
        .load(conn)
        .map_err(StorageError::from)?;
    Ok(rows
        .into_iter()
        .filter(|(_, status, date, charging)| is_regenerable(status, *date, charging, period_start))
        .map(|(id, ..)| id)
        .collect())
}

/// Ids of the entries in `entry_ids` that are billed through a charge that
/// survives regeneration of the period starting `period_start`.
fn entries_with_surviving_links(
    conn: &mut SqliteConnection,
    entry_ids: &[String],
    period_start: NaiveDate,
) -> Result<HashSet<String>> {
    let mut linked = HashSet::new();
    for chunk in chunk_for_sqlite(entry_ids) {
        let rows: Vec<(String, String, NaiveDate, String)> = time_entry_charges::table
            .inner_join(monthly_charges::table.inner_join(projects::table))
            .filter(time_entry_charges::time_entry_id.eq_any(chunk))
            .select((
                time_entry_charges::time_entry_id,
                monthly_charges::status,
                monthly_charges::date,
                projects::charging,
            ))
            .load(conn)
            .map_err(StorageError::from)?;
        for (entry_id, status, date, charging) in rows {
            if !is_regenerable(&status, date, &charging, period_start) {
                linked.insert(entry_id);
            }
        }
    }
    Ok(linked)
}

fn to_charges(rows: Vec<MonthlyChargeDB>) -> Result<Vec<MonthlyCharge>> {
    rows.into_iter()
        .map(|row| MonthlyCharge::try_from(row).map_err(Into::into))
        .collect()
}

#[async_trait]
impl ChargeRepositoryTrait for ChargeRepository {
    fn load_period_snapshot(&self, period: &BillingPeriod) -> Result<PeriodSnapshot> {
        let mut conn = get_connection(&self.pool)?;

        let project_rows = projects::table
            .filter(projects::charging.ne(ChargingPolicy::Manual.as_str()))
            .filter(projects::start_date.lt(period.end))
            .filter(projects::end_date.ge(period.start))
            .select(ProjectDB::as_select())
            .order(projects::name.asc())
            .load::<ProjectDB>(&mut conn)
            .map_err(StorageError::from)?;
        let candidates = to_projects(project_rows)?;
        let project_ids: Vec<String> = candidates.iter().map(|p| p.id.clone()).collect();

        let mut funding_rows = Vec::new();
        let mut entry_rows = Vec::new();
        for chunk in chunk_for_sqlite(&project_ids) {
            funding_rows.extend(
                funding_sources::table
                    .filter(funding_sources::project_id.eq_any(chunk))
                    .select(FundingSourceDB::as_select())
                    .load::<FundingSourceDB>(&mut conn)
                    .map_err(StorageError::from)?,
            );
            entry_rows.extend(
                time_entries::table
                    .filter(time_entries::project_id.eq_any(chunk))
                    .filter(time_entries::start_time.ge(day_start(period.start)))
                    .filter(time_entries::start_time.lt(day_start(period.end)))
                    .select(TimeEntryDB::as_select())
                    .order(time_entries::start_time.asc())
                    .load::<TimeEntryDB>(&mut conn)
                    .map_err(StorageError::from)?,
            );
        }
        let funding = load_funding(&mut conn, funding_rows, Some(period.start))?;
        let entries = load_entries(&mut conn, entry_rows)?;
        let entry_ids: Vec<String> = entries.iter().map(|e| e.id.clone()).collect();
        let linked = entries_with_surviving_links(&mut conn, &entry_ids, period.start)?;

        let mut funding_by_project: HashMap<String, Vec<_>> = HashMap::new();
        for source in funding {
            funding_by_project
                .entry(source.project_id.clone())
                .or_default()
                .push(source);
        }
        let mut entries_by_project: HashMap<String, Vec<_>> = HashMap::new();
        for entry in entries.into_iter().filter(|e| !linked.contains(&e.id)) {
            entries_by_project
                .entry(entry.project_id.clone())
                .or_default()
                .push(entry);
        }

        let projects = candidates
            .into_iter()
            .map(|project| ProjectChargingInput {
                funding: funding_by_project.remove(&project.id).unwrap_or_default(),
                unlinked_entries: entries_by_project.remove(&project.id).unwrap_or_default(),
                project,
            })
            .collect();
        Ok(PeriodSnapshot { projects })
    }

    async fn replace_draft_charges(&self, plan: ChargePlan) -> Result<Vec<MonthlyCharge>> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Vec<MonthlyCharge>> {
                let removed = regenerable_charge_ids(conn, plan.period.start)?;
                for chunk in chunk_for_sqlite(&removed) {
                    diesel::delete(
                        time_entry_charges::table
                            .filter(time_entry_charges::charge_id.eq_any(chunk)),
                    )
                    .execute(conn)
                    .map_err(StorageError::from)?;
                    diesel::delete(monthly_charges::table.filter(monthly_charges::id.eq_any(chunk)))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                debug!(
                    "Removed {} draft charge(s) dated {}",
                    removed.len(),
                    plan.period.start
                );

                let rows: Vec<MonthlyChargeDB> =
                    plan.charges.iter().cloned().map(MonthlyChargeDB::from).collect();
                for chunk in rows.chunks(SQLITE_MAX_ROWS_CHUNK) {
                    diesel::insert_into(monthly_charges::table)
                        .values(chunk)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }

                let links: Vec<TimeEntryChargeDB> = plan
                    .time_entry_links
                    .into_iter()
                    .map(TimeEntryChargeDB::from)
                    .collect();
                for chunk in links.chunks(SQLITE_MAX_ROWS_CHUNK) {
                    diesel::insert_into(time_entry_charges::table)
                        .values(chunk)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }

                Ok(plan.charges)
            })
            .await
    }

    fn list_charges(&self, period_start: NaiveDate) -> Result<Vec<MonthlyCharge>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = monthly_charges::table
            .filter(monthly_charges::date.eq(period_start))
            .select(MonthlyChargeDB::as_select())
            .order(monthly_charges::id.asc())
            .load::<MonthlyChargeDB>(&mut conn)
            .map_err(StorageError::from)?;
        to_charges(rows)
    }

    fn list_charge_lines(&self, period_start: NaiveDate) -> Result<Vec<ChargeLine>> {
        let mut conn = get_connection(&self.pool)?;
        #[allow(clippy::type_complexity)]
        let rows: Vec<(
            String,
            String,
            Option<String>,
            Option<String>,
            Option<String>,
            String,
            Option<String>,
            String,
        )> = monthly_charges::table
            .inner_join(projects::table)
            .inner_join(funding_sources::table)
            .filter(monthly_charges::date.eq(period_start))
            .order((projects::name.asc(), monthly_charges::id.asc()))
            .select((
                monthly_charges::id,
                projects::name,
                funding_sources::cost_centre,
                funding_sources::activity,
                funding_sources::analysis_code,
                monthly_charges::amount,
                monthly_charges::description,
                monthly_charges::status,
            ))
            .load(&mut conn)
            .map_err(StorageError::from)?;

        rows.into_iter()
            .map(
                |(charge_id, project_name, cost_centre, activity, analysis_code, amount, description, status)|
                 -> Result<ChargeLine> {
                    Ok(ChargeLine {
                        charge_id,
                        project_name,
                        cost_centre: cost_centre.unwrap_or_default(),
                        activity: activity.unwrap_or_default(),
                        analysis_code: analysis_code.unwrap_or_default(),
                        amount: parse_decimal(&amount, "amount")?,
                        description: description.unwrap_or_default(),
                        status: parse_enum(&status, "status")?,
                    })
                },
            )
            .collect()
    }

    async fn create_charge(&self, new_charge: NewMonthlyCharge) -> Result<MonthlyCharge> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<MonthlyCharge> {
                let row: MonthlyChargeDB = new_charge.into();
                let result = diesel::insert_into(monthly_charges::table)
                    .values(&row)
                    .returning(MonthlyChargeDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(MonthlyCharge::try_from(result)?)
            })
            .await
    }

    async fn confirm_charges(&self, period_start: NaiveDate) -> Result<Vec<String>> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Vec<String>> {
                let drafts = monthly_charges::table
                    .filter(monthly_charges::date.eq(period_start))
                    .filter(monthly_charges::status.eq(ChargeStatus::Draft.as_str()));
                let ids: Vec<String> = drafts
                    .select(monthly_charges::id)
                    .order(monthly_charges::id.asc())
                    .load(conn)
                    .map_err(StorageError::from)?;
                diesel::update(drafts)
                    .set(monthly_charges::status.eq(ChargeStatus::Confirmed.as_str()))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(ids)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, write_actor::spawn_writer};
    use crate::funding::FundingRepository;
    use crate::projects::ProjectRepository;
    use crate::time_entries::TimeEntryRepository;
    use chrono::NaiveDateTime;
    use procat_core::charges::TimeEntryLink;
    use procat_core::funding::{FundingKind, FundingRepositoryTrait, NewFundingSource};
    use procat_core::projects::{NewProject, ProjectNature, ProjectRepositoryTrait, ProjectStatus};
    use procat_core::time_entries::{NewTimeEntry, TimeEntryRepositoryTrait};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    struct Fixture {
        charges: ChargeRepository,
        _temp_dir: tempfile::TempDir,
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        date(2025, 4, day).and_hms_opt(hour, 0, 0).unwrap()
    }

    /// One Actual project with one funding source and two April entries.
    async fn setup() -> Fixture {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db").to_string_lossy().to_string();
        let pool = create_pool(&db_path).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());

        let mut conn = get_connection(&pool).expect("Failed to get connection");
        diesel::sql_query(
            "INSERT INTO users (id, username, full_name, email, is_superuser) \
             VALUES ('u1', 'rse1', 'Ada Lovelace', 'ada@example.com', 0)",
        )
        .execute(&mut conn)
        .expect("Failed to create user");

        let projects = ProjectRepository::new(Arc::clone(&pool), writer.clone());
        projects
            .create(NewProject {
                id: Some("p1".to_string()),
                name: "Alpha".to_string(),
                nature: ProjectNature::Standard,
                pi: "Dr Who".to_string(),
                department: "Physics".to_string(),
                lead: Some("u1".to_string()),
                start_date: Some(date(2025, 1, 1)),
                end_date: Some(date(2025, 12, 31)),
                status: ProjectStatus::Active,
                charging: ChargingPolicy::Actual,
            })
            .await
            .unwrap();

        let funding = FundingRepository::new(Arc::clone(&pool), writer.clone());
        funding
            .create(NewFundingSource {
                id: Some("f1".to_string()),
                project_id: "p1".to_string(),
                kind: FundingKind::External,
                funding_body: Some("EPSRC".to_string()),
                cost_centre: Some("CC1".to_string()),
                activity: Some("G12345".to_string()),
                analysis_code: None,
                expiry_date: Some(date(2026, 1, 1)),
                budget: dec!(1000),
                daily_rate: dec!(100),
                monthly_pro_rata_charge: None,
            })
            .await
            .unwrap();

        let entries = TimeEntryRepository::new(Arc::clone(&pool), writer.clone());
        for (id, day) in [("e1", 7), ("e2", 8)] {
            entries
                .create(NewTimeEntry {
                    id: Some(id.to_string()),
                    user_id: "u1".to_string(),
                    project_id: "p1".to_string(),
                    start_time: at(day, 9),
                    end_time: at(day, 16),
                })
                .await
                .unwrap();
        }

        Fixture {
            charges: ChargeRepository::new(Arc::clone(&pool), writer),
            _temp_dir: temp_dir,
        }
    }

    fn april() -> BillingPeriod {
        BillingPeriod::starting(date(2025, 4, 1))
    }

    fn plan(charge_id: &str, amount: Decimal) -> ChargePlan {
        ChargePlan {
            period: april(),
            charges: vec![MonthlyCharge {
                id: charge_id.to_string(),
                project_id: "p1".to_string(),
                funding_id: "f1".to_string(),
                amount,
                date: date(2025, 4, 1),
                description: Some("RSE Project Alpha".to_string()),
                status: ChargeStatus::Draft,
            }],
            time_entry_links: ["e1", "e2"]
                .iter()
                .map(|entry| TimeEntryLink {
                    time_entry_id: entry.to_string(),
                    charge_id: charge_id.to_string(),
                })
                .collect(),
            balances: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_snapshot_lists_candidate_project_inputs() {
        let fixture = setup().await;
        let snapshot = fixture.charges.load_period_snapshot(&april()).unwrap();

        assert_eq!(snapshot.projects.len(), 1);
        let input = &snapshot.projects[0];
        assert_eq!(input.project.id, "p1");
        assert_eq!(input.funding.len(), 1);
        assert_eq!(input.funding[0].charged, Decimal::ZERO);
        assert_eq!(input.unlinked_entries.len(), 2);

        let march = BillingPeriod::starting(date(2025, 3, 1));
        let snapshot = fixture.charges.load_period_snapshot(&march).unwrap();
        assert!(snapshot.projects[0].unlinked_entries.is_empty());
    }

    #[tokio::test]
    async fn test_replacing_drafts_is_idempotent() {
        let fixture = setup().await;
        fixture.charges.replace_draft_charges(plan("c1", dec!(140))).await.unwrap();
        fixture.charges.replace_draft_charges(plan("c2", dec!(140))).await.unwrap();

        let charges = fixture.charges.list_charges(date(2025, 4, 1)).unwrap();
        assert_eq!(charges.len(), 1);
        assert_eq!(charges[0].id, "c2");

        // Drafts of the period being regenerated do not count against funding.
        let snapshot = fixture.charges.load_period_snapshot(&april()).unwrap();
        assert_eq!(snapshot.projects[0].funding[0].charged, Decimal::ZERO);
        assert_eq!(snapshot.projects[0].unlinked_entries.len(), 2);
    }

    #[tokio::test]
    async fn test_confirmed_charges_survive_regeneration() {
        let fixture = setup().await;
        fixture.charges.replace_draft_charges(plan("c1", dec!(140))).await.unwrap();

        let confirmed = fixture.charges.confirm_charges(date(2025, 4, 1)).await.unwrap();
        assert_eq!(confirmed, vec!["c1".to_string()]);

        let snapshot = fixture.charges.load_period_snapshot(&april()).unwrap();
        assert_eq!(snapshot.projects[0].funding[0].charged, dec!(140));
        assert!(snapshot.projects[0].unlinked_entries.is_empty());

        fixture
            .charges
            .replace_draft_charges(ChargePlan {
                charges: Vec::new(),
                time_entry_links: Vec::new(),
                ..plan("unused", Decimal::ZERO)
            })
            .await
            .unwrap();
        let charges = fixture.charges.list_charges(date(2025, 4, 1)).unwrap();
        assert_eq!(charges.len(), 1);
        assert_eq!(charges[0].status, ChargeStatus::Confirmed);
    }

    #[tokio::test]
    async fn test_charge_lines_carry_account_codes() {
        let fixture = setup().await;
        fixture.charges.replace_draft_charges(plan("c1", dec!(140.50))).await.unwrap();

        let lines = fixture.charges.list_charge_lines(date(2025, 4, 1)).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].project_name, "Alpha");
        assert_eq!(lines[0].cost_centre, "CC1");
        assert_eq!(lines[0].activity, "G12345");
        assert_eq!(lines[0].analysis_code, "");
        assert_eq!(lines[0].amount, dec!(140.50));
        assert_eq!(lines[0].status, ChargeStatus::Draft);
    }

    #[tokio::test]
    async fn test_create_charge_is_listed() {
        let fixture = setup().await;
        let charge = fixture
            .charges
            .create_charge(NewMonthlyCharge {
                id: None,
                project_id: "p1".to_string(),
                funding_id: "f1".to_string(),
                amount: dec!(25),
                date: date(2025, 4, 1),
                description: None,
                status: ChargeStatus::Confirmed,
            })
            .await
            .unwrap();

        let charges = fixture.charges.list_charges(date(2025, 4, 1)).unwrap();
        assert_eq!(charges, vec![charge]);
    }
}
