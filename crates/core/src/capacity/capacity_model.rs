use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{Result, ValidationError};

/// Share of a full-time week a new team member spends on projects.
pub const DEFAULT_CAPACITY: Decimal = dec!(0.7);

/// Fraction of one FTE a user can give to project work from `start_date`
/// until their next capacity record starts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Capacity {
    pub id: String,
    pub user_id: String,
    pub value: Decimal,
    pub start_date: NaiveDate,
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "From {}, the capacity of {} is {}.",
            self.start_date, self.user_id, self.value
        )
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewCapacity {
    pub id: Option<String>,
    pub user_id: String,
    #[serde(default = "default_capacity")]
    pub value: Decimal,
    pub start_date: NaiveDate,
}

fn default_capacity() -> Decimal {
    DEFAULT_CAPACITY
}

impl NewCapacity {
    pub fn validate(&self) -> Result<()> {
        if self.value < Decimal::ZERO || self.value > Decimal::ONE {
            return Err(ValidationError::InvalidInput(format!(
                "Capacity must be between 0 and 1, got {}.",
                self.value
            ))
            .into());
        }
        Ok(())
    }
}

/// Value of a series on one business day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeseriesPoint {
    pub date: NaiveDate,
    pub value: Decimal,
}
