//! Repository traits for funding sources.

use async_trait::async_trait;

use super::{FundingSource, NewFundingSource};
use crate::errors::Result;

/// Trait defining the contract for funding source repository operations.
#[async_trait]
pub trait FundingRepositoryTrait: Send + Sync {
    fn get_by_id(&self, funding_id: &str) -> Result<FundingSource>;

    /// Funding sources of one project, in no particular order.
    fn list_by_project(&self, project_id: &str) -> Result<Vec<FundingSource>>;

    fn list(&self) -> Result<Vec<FundingSource>>;

    async fn create(&self, new_funding: NewFundingSource) -> Result<FundingSource>;
}
