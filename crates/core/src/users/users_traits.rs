use async_trait::async_trait;

use super::User;
use crate::errors::Result;

#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn get_by_id(&self, user_id: &str) -> Result<User>;

    fn list(&self) -> Result<Vec<User>>;

    async fn create(&self, user: User) -> Result<User>;
}
