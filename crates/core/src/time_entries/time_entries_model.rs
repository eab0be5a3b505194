//! Time entry domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::{Result, ValidationError};

/// Time a user logged against a project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub id: String,
    pub user_id: String,
    pub project_id: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    /// Charges this entry has been billed through.
    pub charge_ids: Vec<String>,
}

impl TimeEntry {
    /// Logged duration in hours.
    pub fn hours(&self) -> Decimal {
        let seconds = (self.end_time - self.start_time).num_seconds().max(0);
        Decimal::from(seconds) / dec!(3600)
    }

    pub fn is_charged(&self) -> bool {
        !self.charge_ids.is_empty()
    }
}

/// Input model for logging time
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewTimeEntry {
    pub id: Option<String>,
    pub user_id: String,
    pub project_id: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

impl NewTimeEntry {
    pub fn validate(&self) -> Result<()> {
        if self.end_time <= self.start_time {
            return Err(ValidationError::InvalidInput(
                "The end time must be after the start time.".to_string(),
            )
            .into());
        }
        Ok(())
    }
}

/// Hours per project id, in project id order.
pub fn hours_by_project(entries: &[TimeEntry]) -> BTreeMap<String, Decimal> {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for entry in entries {
        *totals.entry(entry.project_id.clone()).or_default() += entry.hours();
    }
    totals
}
