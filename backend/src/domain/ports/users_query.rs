//! Driving port for reading users.
//!
//! HTTP handlers depend on this trait rather than on the store so they can be
//! exercised against any repository.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Read-side user use-cases.
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every stored user; no ordering guarantee.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// One user, or a `not_found` error.
    async fn get_user(&self, id: &UserId) -> Result<User, Error>;
}
