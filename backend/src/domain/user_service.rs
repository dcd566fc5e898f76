//! User service implementing the query and command driving ports.
//!
//! Each use-case is one repository call. The service owns draft validation
//! and the translation of store failures and empty results into domain
//! errors; it never retries.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, warn};

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{Error, User, UserDraft, UserFields, UserId, ValidationFailure, validate_draft};

/// User service backed by a [`UserRepository`].
#[derive(Clone)]
pub struct UserService<R> {
    repository: Arc<R>,
}

impl<R> UserService<R> {
    /// Create a service over `repository`.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use userinfo::domain::UserService;
    /// # use userinfo::domain::ports::UsersQuery;
    /// # use userinfo::outbound::persistence::InMemoryUserRepository;
    /// # async fn example() -> Result<(), userinfo::domain::Error> {
    /// let service = UserService::new(Arc::new(InMemoryUserRepository::default()));
    /// assert!(service.list_users().await?.is_empty());
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn map_persistence_error(err: UserPersistenceError) -> Error {
    error!(error = %err, "user store operation failed");
    Error::internal(err.to_string())
}

fn user_not_found(id: &UserId) -> Error {
    Error::not_found(format!("user {id} not found")).with_details(json!({ "id": id.as_str() }))
}

fn map_validation_failure(failure: ValidationFailure) -> Error {
    for violation in failure.violations() {
        warn!(
            field = %violation.field,
            rule = %violation.rule,
            value = violation.value.as_deref().unwrap_or_default(),
            "user draft rejected"
        );
    }
    Error::invalid_request(failure.to_string())
        .with_details(json!({ "violations": failure.violations() }))
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.repository.list().await.map_err(map_persistence_error)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| user_not_found(id))
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, draft: UserDraft) -> Result<UserId, Error> {
        validate_draft(&draft).map_err(map_validation_failure)?;
        self.repository
            .insert(&draft)
            .await
            .map_err(map_persistence_error)
    }

    async fn update_user(&self, id: &UserId, fields: UserFields) -> Result<User, Error> {
        self.repository
            .replace_fields(id, &fields)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| user_not_found(id))
    }

    async fn delete_user(&self, id: &UserId) -> Result<u64, Error> {
        let deleted = self
            .repository
            .delete(id)
            .await
            .map_err(map_persistence_error)?;
        if deleted == 0 {
            return Err(user_not_found(id));
        }
        Ok(deleted)
    }
}
