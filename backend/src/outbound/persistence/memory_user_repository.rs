//! In-process `UserRepository` used by tests and local smoke runs.
//!
//! Identifiers come from a counter rendered as 24 hex digits, so they parse
//! as object ids exactly like the ones MongoDB assigns. Listing returns
//! documents ordered by id, so counter-assigned users sort ahead of seeded
//! users carrying real object ids.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserDraft, UserFields, UserId};

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    users: BTreeMap<UserId, User>,
}

/// Thread-safe in-memory user store.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    inner: Mutex<Inner>,
}

impl InMemoryUserRepository {
    /// Create a store pre-populated with `users`.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let users: BTreeMap<_, _> = users
            .into_iter()
            .map(|user| (user.id.clone(), user))
            .collect();
        let next_id = users
            .keys()
            .filter_map(|id| u64::from_str_radix(id.as_str(), 16).ok())
            .max()
            .unwrap_or(0);
        Self {
            inner: Mutex::new(Inner { next_id, users }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, UserPersistenceError> {
        self.inner
            .lock()
            .map_err(|_| UserPersistenceError::connection("in-memory user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.lock()?.users.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock()?.users.get(id).cloned())
    }

    async fn insert(&self, draft: &UserDraft) -> Result<UserId, UserPersistenceError> {
        let mut inner = self.lock()?;
        inner.next_id += 1;
        let id = UserId::new(format!("{:024x}", inner.next_id))
            .map_err(|err| UserPersistenceError::query(err.to_string()))?;
        inner
            .users
            .insert(id.clone(), draft.clone().into_user(id.clone()));
        Ok(id)
    }

    async fn replace_fields(
        &self,
        id: &UserId,
        fields: &UserFields,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut inner = self.lock()?;
        Ok(inner.users.get_mut(id).map(|user| {
            user.apply(fields.clone());
            user.clone()
        }))
    }

    async fn delete(&self, id: &UserId) -> Result<u64, UserPersistenceError> {
        Ok(u64::from(self.lock()?.users.remove(id).is_some()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn draft() -> UserDraft {
        UserDraft {
            first_name: "Ana".to_owned(),
            last_name: "Lee".to_owned(),
            username: "ana".to_owned(),
            age: 30,
            email: Some("ana@example.com".to_owned()),
            ..UserDraft::default()
        }
    }

    #[rstest]
    #[tokio::test]
    async fn inserted_users_get_object_id_shaped_ids(draft: UserDraft) {
        let repo = InMemoryUserRepository::default();
        let first = repo.insert(&draft).await.expect("insert");
        let second = repo.insert(&draft).await.expect("insert");
        assert_eq!(first.as_str(), "000000000000000000000001");
        assert_eq!(second.as_str(), "000000000000000000000002");

        let listed = repo.list().await.expect("list");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, first);
    }

    #[rstest]
    #[tokio::test]
    async fn replace_fields_returns_the_updated_user(draft: UserDraft) {
        let repo = InMemoryUserRepository::default();
        let id = repo.insert(&draft).await.expect("insert");
        let fields = UserFields {
            first_name: "Bo".to_owned(),
            age: 41,
            ..UserFields::default()
        };

        let updated = repo
            .replace_fields(&id, &fields)
            .await
            .expect("update")
            .expect("user exists");
        assert_eq!(updated.first_name, "Bo");
        assert!(updated.email.is_empty());
        assert_eq!(updated.username, "ana");
        assert_eq!(repo.find_by_id(&id).await.expect("find"), Some(updated));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_reports_how_many_were_removed(draft: UserDraft) {
        let repo = InMemoryUserRepository::default();
        let id = repo.insert(&draft).await.expect("insert");
        assert_eq!(repo.delete(&id).await.expect("delete"), 1);
        assert_eq!(repo.delete(&id).await.expect("delete"), 0);
        assert_eq!(repo.find_by_id(&id).await.expect("find"), None);
    }

    #[rstest]
    #[tokio::test]
    async fn seeded_stores_continue_the_id_sequence(draft: UserDraft) {
        let seeded = draft
            .clone()
            .into_user(UserId::new("00000000000000000000000a").expect("valid id"));
        let repo = InMemoryUserRepository::with_users([seeded]);
        let id = repo.insert(&draft).await.expect("insert");
        assert_eq!(id.as_str(), "00000000000000000000000b");
    }

    #[rstest]
    #[tokio::test]
    async fn listing_is_ordered_by_id_not_insertion(draft: UserDraft) {
        let seeded_id = UserId::new("65a1f0c2e4b0a1b2c3d4e5f6").expect("valid id");
        let seeded = draft.clone().into_user(seeded_id.clone());
        let repo = InMemoryUserRepository::with_users([seeded]);
        let inserted = repo.insert(&draft).await.expect("insert");

        let listed: Vec<_> = repo
            .list()
            .await
            .expect("list")
            .into_iter()
            .map(|user| user.id)
            .collect();
        assert_eq!(listed, [inserted, seeded_id]);
    }
}
