//! Project repository and service traits.

use async_trait::async_trait;

use super::projects_model::{NewProject, Project, ProjectStatus, ProjectSummary};
use crate::errors::Result;
use crate::funding::{FundingSource, NewFundingSource};

/// Trait defining the contract for Project repository operations.
#[async_trait]
pub trait ProjectRepositoryTrait: Send + Sync {
    fn get_by_id(&self, project_id: &str) -> Result<Project>;

    /// Lists projects, optionally restricted to the given statuses.
    fn list(&self, status_filter: Option<&[ProjectStatus]>) -> Result<Vec<Project>>;

    async fn create(&self, new_project: NewProject) -> Result<Project>;

    async fn update(&self, project: Project) -> Result<Project>;
}

/// Trait defining the contract for Project service operations.
#[async_trait]
pub trait ProjectServiceTrait: Send + Sync {
    fn get_project(&self, project_id: &str) -> Result<Project>;

    fn list_projects(&self, status_filter: Option<&[ProjectStatus]>) -> Result<Vec<Project>>;

    async fn create_project(&self, new_project: NewProject) -> Result<Project>;

    async fn update_project(&self, project: Project) -> Result<Project>;

    /// Adds funding to a project. Pro-rata projects get a suggested monthly
    /// charge when none is given.
    async fn add_funding_source(&self, new_funding: NewFundingSource) -> Result<FundingSource>;

    /// Project with its funding, derived metrics and warnings.
    fn get_project_summary(&self, project_id: &str) -> Result<ProjectSummary>;
}
