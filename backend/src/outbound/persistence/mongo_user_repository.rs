//! MongoDB-backed `UserRepository` implementation.
//!
//! Each port method is one driver call against the configured collection.
//! Driver errors are split into connection failures (server selection, I/O,
//! cleared pools) and everything else.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::doc;
use mongodb::error::{Error as MongoError, ErrorKind};
use mongodb::options::ReturnDocument;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserDraft, UserFields, UserId};

use super::documents::{UserDocument, id_filter, object_id, set_fields, user_id_from_object_id};

/// MongoDB-backed implementation of the user repository port.
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<UserDocument>,
}

impl MongoUserRepository {
    /// Create a repository over an already connected collection.
    pub fn new(collection: Collection<UserDocument>) -> Self {
        Self { collection }
    }
}

fn map_mongo_error(error: MongoError) -> UserPersistenceError {
    let message = error.to_string();
    if matches!(
        *error.kind,
        ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) | ErrorKind::ConnectionPoolCleared { .. }
    ) {
        UserPersistenceError::connection(message)
    } else {
        UserPersistenceError::query(message)
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let documents: Vec<UserDocument> = self
            .collection
            .find(doc! {})
            .await
            .map_err(map_mongo_error)?
            .try_collect()
            .await
            .map_err(map_mongo_error)?;
        documents.into_iter().map(User::try_from).collect()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let filter = id_filter(object_id(id)?);
        self.collection
            .find_one(filter)
            .await
            .map_err(map_mongo_error)?
            .map(User::try_from)
            .transpose()
    }

    async fn insert(&self, draft: &UserDraft) -> Result<UserId, UserPersistenceError> {
        let result = self
            .collection
            .insert_one(UserDocument::from(draft))
            .await
            .map_err(map_mongo_error)?;
        let inserted = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| UserPersistenceError::query("store assigned a non-ObjectId _id"))?;
        user_id_from_object_id(inserted)
    }

    async fn replace_fields(
        &self,
        id: &UserId,
        fields: &UserFields,
    ) -> Result<Option<User>, UserPersistenceError> {
        let filter = id_filter(object_id(id)?);
        let update = set_fields(fields);
        debug!(user_id = %id, %update, "updating user");
        self.collection
            .find_one_and_update(filter, update)
            .return_document(ReturnDocument::After)
            .await
            .map_err(map_mongo_error)?
            .map(User::try_from)
            .transpose()
    }

    async fn delete(&self, id: &UserId) -> Result<u64, UserPersistenceError> {
        let filter = id_filter(object_id(id)?);
        let result = self
            .collection
            .delete_one(filter)
            .await
            .map_err(map_mongo_error)?;
        Ok(result.deleted_count)
    }
}

#[cfg(test)]
mod tests {
    //! Error classification only; driver calls need a live server.

    use super::*;
    use rstest::rstest;
    use std::io;
    use std::sync::Arc;

    #[rstest]
    fn io_errors_are_connection_failures() {
        let err = MongoError::from(ErrorKind::Io(Arc::new(io::Error::new(
            io::ErrorKind::ConnectionRefused,
            "refused",
        ))));
        assert!(matches!(
            map_mongo_error(err),
            UserPersistenceError::Connection { .. }
        ));
    }

    #[rstest]
    fn other_driver_errors_are_query_failures() {
        let err = MongoError::custom("cursor killed");
        assert!(matches!(
            map_mongo_error(err),
            UserPersistenceError::Query { .. }
        ));
    }
}
