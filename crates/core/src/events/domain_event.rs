//! Domain event types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Domain events emitted by core services after successful mutations.
///
/// Runtime adapters translate them into side effects such as sending the
/// monthly report or refreshing cached summaries.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// Draft charges of a period were deleted and generated again.
    ChargesRegenerated {
        period_start: NaiveDate,
        charge_ids: Vec<String>,
        /// Sum of every charge dated to the period, drafts and confirmed.
        total: Decimal,
    },

    /// Draft charges of a period were confirmed.
    ChargesConfirmed {
        period_start: NaiveDate,
        charge_ids: Vec<String>,
    },

    /// A charge was entered by hand.
    ManualChargeCreated {
        charge_id: String,
        project_id: String,
    },

    /// Projects were created or updated.
    ProjectsChanged { project_ids: Vec<String> },

    /// Funding sources were added to a project.
    FundingChanged {
        project_id: String,
        funding_ids: Vec<String>,
    },

    /// A capacity record was created or updated.
    CapacityChanged { user_id: String },
}

impl DomainEvent {
    pub fn charges_regenerated(
        period_start: NaiveDate,
        charge_ids: Vec<String>,
        total: Decimal,
    ) -> Self {
        Self::ChargesRegenerated {
            period_start,
            charge_ids,
            total,
        }
    }

    pub fn charges_confirmed(period_start: NaiveDate, charge_ids: Vec<String>) -> Self {
        Self::ChargesConfirmed {
            period_start,
            charge_ids,
        }
    }

    pub fn manual_charge_created(charge_id: String, project_id: String) -> Self {
        Self::ManualChargeCreated {
            charge_id,
            project_id,
        }
    }

    pub fn projects_changed(project_ids: Vec<String>) -> Self {
        Self::ProjectsChanged { project_ids }
    }

    pub fn funding_changed(project_id: String, funding_ids: Vec<String>) -> Self {
        Self::FundingChanged {
            project_id,
            funding_ids,
        }
    }

    pub fn capacity_changed(user_id: String) -> Self {
        Self::CapacityChanged { user_id }
    }
}
