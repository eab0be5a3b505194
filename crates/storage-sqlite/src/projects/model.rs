//! Database model for projects.

use chrono::NaiveDate;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::StorageError;
use crate::utils::parse_enum;
use procat_core::projects::{NewProject, Project};

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::projects)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDB {
    pub id: String,
    pub name: String,
    pub nature: String,
    pub pi: String,
    pub department: String,
    pub lead_id: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: String,
    pub charging: String,
}

impl TryFrom<ProjectDB> for Project {
    type Error = StorageError;

    fn try_from(db: ProjectDB) -> Result<Self, Self::Error> {
        Ok(Self {
            nature: parse_enum(&db.nature, "nature")?,
            status: parse_enum(&db.status, "status")?,
            charging: parse_enum(&db.charging, "charging")?,
            id: db.id,
            name: db.name,
            pi: db.pi,
            department: db.department,
            lead: db.lead_id,
            start_date: db.start_date,
            end_date: db.end_date,
        })
    }
}

impl From<Project> for ProjectDB {
    fn from(domain: Project) -> Self {
        Self {
            id: domain.id,
            name: domain.name,
            nature: domain.nature.as_str().to_string(),
            pi: domain.pi,
            department: domain.department,
            lead_id: domain.lead,
            start_date: domain.start_date,
            end_date: domain.end_date,
            status: domain.status.as_str().to_string(),
            charging: domain.charging.as_str().to_string(),
        }
    }
}

impl From<NewProject> for ProjectDB {
    fn from(domain: NewProject) -> Self {
        Self {
            id: domain
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            name: domain.name,
            nature: domain.nature.as_str().to_string(),
            pi: domain.pi,
            department: domain.department,
            lead_id: domain.lead,
            start_date: domain.start_date,
            end_date: domain.end_date,
            status: domain.status.as_str().to_string(),
            charging: domain.charging.as_str().to_string(),
        }
    }
}
