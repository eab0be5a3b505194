//! Per-business-day series of team capacity and planned project effort.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

use super::capacity_model::{Capacity, TimeseriesPoint};
use crate::funding::FundingSource;
use crate::projects::Project;
use crate::utils::time_utils::business_days;

/// A project with the funding its effort is derived from.
#[derive(Debug, Clone)]
pub struct ProjectEffort {
    pub project: Project,
    pub funding: Vec<FundingSource>,
}

struct Series {
    start: NaiveDate,
    end: NaiveDate,
    values: BTreeMap<NaiveDate, Decimal>,
}

impl Series {
    fn new(start: NaiveDate, end: NaiveDate) -> Self {
        let values = business_days(start, end)
            .into_iter()
            .map(|day| (day, Decimal::ZERO))
            .collect();
        Self { start, end, values }
    }

    /// Adds `value` to every business day of `[from, until)` inside the window.
    fn add(&mut self, from: NaiveDate, until: NaiveDate, value: Decimal) {
        let from = from.max(self.start);
        let until = until.min(self.end);
        for day in business_days(from, until) {
            if let Some(total) = self.values.get_mut(&day) {
                *total += value;
            }
        }
    }

    fn into_points(self) -> Vec<TimeseriesPoint> {
        self.values
            .into_iter()
            .map(|(date, value)| TimeseriesPoint { date, value })
            .collect()
    }
}

/// Team capacity per business day in `[start, end)`.
///
/// Each capacity applies from its start date until the start of the same
/// user's next capacity, or the end of the window.
pub fn capacity_timeseries(
    capacities: &[Capacity],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<TimeseriesPoint> {
    let mut series = Series::new(start, end);

    let mut by_user: HashMap<&str, Vec<&Capacity>> = HashMap::new();
    for capacity in capacities.iter().filter(|c| c.start_date <= end) {
        by_user.entry(&capacity.user_id).or_default().push(capacity);
    }
    for user_capacities in by_user.values_mut() {
        user_capacities.sort_by_key(|c| c.start_date);
        for (position, capacity) in user_capacities.iter().enumerate() {
            let until = user_capacities
                .get(position + 1)
                .map_or(end, |next| next.start_date);
            series.add(capacity.start_date, until, capacity.value);
        }
    }
    series.into_points()
}

/// Funded effort per business day in `[start, end)`, summed over every
/// dated project with funding that overlaps the window.
pub fn effort_timeseries(
    projects: &[ProjectEffort],
    start: NaiveDate,
    end: NaiveDate,
    working_days_per_year: u32,
) -> Vec<TimeseriesPoint> {
    let mut series = Series::new(start, end);
    for entry in projects {
        let project = &entry.project;
        if entry.funding.is_empty() || !project.overlaps(start, end) {
            continue;
        }
        let (Some(project_start), Some(project_end)) = (project.start_date, project.end_date)
        else {
            continue;
        };
        if let Some(per_day) = project.effort_per_day(&entry.funding, working_days_per_year) {
            series.add(project_start, project_end, per_day);
        }
    }
    series.into_points()
}
