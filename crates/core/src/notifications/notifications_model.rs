use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, ValidationError};
use crate::funding::FundingSource;
use crate::projects::Project;

/// A message ready to be handed to a delivery sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub attachment: Option<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub filename: String,
    pub content_type: String,
    pub content: String,
}

/// What a project status threshold measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdKind {
    Effort,
    Weeks,
}

impl ThresholdKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThresholdKind::Effort => "effort",
            ThresholdKind::Weeks => "weeks",
        }
    }

    /// Unit of the remaining value quoted in the message.
    pub fn unit(&self) -> &'static str {
        match self {
            ThresholdKind::Effort => "days",
            ThresholdKind::Weeks => "weeks",
        }
    }
}

impl fmt::Display for ThresholdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThresholdKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "effort" => Ok(ThresholdKind::Effort),
            "weeks" => Ok(ThresholdKind::Weeks),
            _ => Err(ValidationError::InvalidInput(
                "Invalid threshold type provided.".to_string(),
            )
            .into()),
        }
    }
}

/// Funding sources whose balance and expiry disagree on a given day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    /// Not yet expired but with no money left.
    pub ran_out_not_expired: Vec<FundingSource>,
    /// Expired with money still left.
    pub expired_with_budget_left: Vec<FundingSource>,
}

impl BudgetStatus {
    pub fn is_empty(&self) -> bool {
        self.ran_out_not_expired.is_empty() && self.expired_with_budget_left.is_empty()
    }
}

/// An active project whose time logged last month costs more than its
/// active funding has left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverBudgetProject {
    pub project: Project,
    pub logged_cost: Decimal,
    pub active_funding_left: Decimal,
}
