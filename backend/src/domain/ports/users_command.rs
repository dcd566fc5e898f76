//! Driving port for creating, updating and deleting users.

use async_trait::async_trait;

use crate::domain::{Error, User, UserDraft, UserFields, UserId};

/// Write-side user use-cases.
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Validate and insert `draft`, returning the assigned identifier.
    async fn create_user(&self, draft: UserDraft) -> Result<UserId, Error>;

    /// Overwrite the updatable fields of `id` and return the updated user.
    async fn update_user(&self, id: &UserId, fields: UserFields) -> Result<User, Error>;

    /// Delete `id`, returning the number of documents removed (always 1 on
    /// success).
    async fn delete_user(&self, id: &UserId) -> Result<u64, Error>;
}
