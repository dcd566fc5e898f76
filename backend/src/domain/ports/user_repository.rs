//! Driven port for the user record store and its errors.

use async_trait::async_trait;

use crate::domain::{User, UserDraft, UserFields, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user store adapters.
    pub enum UserPersistenceError {
        /// The store could not be reached.
        Connection { message: String } => "user store connection failed: {message}",
        /// A query or mutation failed, or a stored document did not decode.
        Query { message: String } => "user store query failed: {message}",
    }
}

/// One collection of user documents.
///
/// Every method is a single round trip; adapters neither retry nor wrap calls
/// in transactions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Return every stored user, in store order.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Insert a new document and return the identifier the store assigned.
    async fn insert(&self, draft: &UserDraft) -> Result<UserId, UserPersistenceError>;

    /// Overwrite the four updatable fields and return the document as it is
    /// after the write, or `None` when no document matched.
    async fn replace_fields(
        &self,
        id: &UserId,
        fields: &UserFields,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Remove at most one document and return how many were removed.
    async fn delete(&self, id: &UserId) -> Result<u64, UserPersistenceError>;
}
