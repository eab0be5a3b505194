use async_trait::async_trait;
use chrono::NaiveDate;

use super::capacity_model::{Capacity, NewCapacity, TimeseriesPoint};
use crate::errors::Result;

#[async_trait]
pub trait CapacityRepositoryTrait: Send + Sync {
    /// Capacities starting on or before `until`, ordered by start date.
    fn list_starting_before(&self, until: NaiveDate) -> Result<Vec<Capacity>>;

    fn list_for_user(&self, user_id: &str) -> Result<Vec<Capacity>>;

    async fn create(&self, new_capacity: NewCapacity) -> Result<Capacity>;
}

#[async_trait]
pub trait CapacityServiceTrait: Send + Sync {
    async fn create_capacity(&self, new_capacity: NewCapacity) -> Result<Capacity>;

    /// Summed capacity of the team for each business day in `[start, end)`.
    fn get_capacity_timeseries(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TimeseriesPoint>>;

    /// Summed funded effort per day of all projects for each business day in
    /// `[start, end)`.
    fn get_effort_timeseries(&self, start: NaiveDate, end: NaiveDate)
        -> Result<Vec<TimeseriesPoint>>;
}
