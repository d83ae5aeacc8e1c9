use async_trait::async_trait;

use crate::domain::entities::User;
use crate::errors::ActionError;

/// Persistence contract for users. Narrowed from the reference (which also
/// carried auth credential storage and LLM bot memories, both out of scope).
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: User) -> Result<User, ActionError>;
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, ActionError>;
    async fn list_users(&self, user_ids: &[String]) -> Result<Vec<User>, ActionError>;
}
