use async_trait::async_trait;
use chrono::NaiveDate;

use super::{NewTimeEntry, TimeEntry};
use crate::errors::Result;

/// Trait defining the contract for time entry repository operations.
///
/// Date ranges are half-open: entries starting on or after `start` and
/// before `end` are returned.
#[async_trait]
pub trait TimeEntryRepositoryTrait: Send + Sync {
    fn list_for_period(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<TimeEntry>>;

    fn list_for_user(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TimeEntry>>;

    async fn create(&self, new_entry: NewTimeEntry) -> Result<TimeEntry>;
}
