//! BSON document shape of the user collection.
//!
//! Field names are the lowercase forms already present in existing data
//! (`firstname`, `datecreated`, ...). Missing fields decode to their empty
//! values so documents written by older clients still load.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, Document, doc};
use serde::{Deserialize, Serialize};

use crate::domain::ports::UserPersistenceError;
use crate::domain::{User, UserDraft, UserFields, UserId};

/// One stored user as it appears in MongoDB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<ObjectId>,
    #[serde(default)]
    pub(crate) firstname: String,
    #[serde(default)]
    pub(crate) lastname: String,
    #[serde(default)]
    pub(crate) username: String,
    #[serde(default)]
    pub(crate) age: u8,
    #[serde(default)]
    pub(crate) email: String,
    #[serde(default)]
    pub(crate) status: bool,
    #[serde(default)]
    pub(crate) datecreated: Option<bson::DateTime>,
}

impl From<&UserDraft> for UserDocument {
    fn from(draft: &UserDraft) -> Self {
        Self {
            id: None,
            firstname: draft.first_name.clone(),
            lastname: draft.last_name.clone(),
            username: draft.username.clone(),
            age: draft.age,
            email: draft.email.clone().unwrap_or_default(),
            status: draft.status,
            datecreated: draft.date_created.map(bson::DateTime::from_chrono),
        }
    }
}

impl TryFrom<UserDocument> for User {
    type Error = UserPersistenceError;

    fn try_from(document: UserDocument) -> Result<Self, Self::Error> {
        let object_id = document
            .id
            .ok_or_else(|| UserPersistenceError::query("stored user has no _id"))?;
        Ok(Self {
            id: user_id_from_object_id(object_id)?,
            first_name: document.firstname,
            last_name: document.lastname,
            username: document.username,
            age: document.age,
            email: document.email,
            status: document.status,
            date_created: document.datecreated.map(bson::DateTime::to_chrono),
        })
    }
}

pub(crate) fn object_id(id: &UserId) -> Result<ObjectId, UserPersistenceError> {
    ObjectId::parse_str(id.as_str()).map_err(|err| UserPersistenceError::query(err.to_string()))
}

pub(crate) fn user_id_from_object_id(object_id: ObjectId) -> Result<UserId, UserPersistenceError> {
    UserId::new(object_id.to_hex()).map_err(|err| UserPersistenceError::query(err.to_string()))
}

pub(crate) fn id_filter(object_id: ObjectId) -> Document {
    doc! { "_id": object_id }
}

/// `$set` over exactly the four updatable fields.
pub(crate) fn set_fields(fields: &UserFields) -> Document {
    doc! {
        "$set": {
            "firstname": fields.first_name.as_str(),
            "lastname": fields.last_name.as_str(),
            "age": i32::from(fields.age),
            "email": fields.email.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    const HEX: &str = "65a1f0c2e4b0a1b2c3d4e5f6";

    fn draft() -> UserDraft {
        UserDraft {
            first_name: "Ana".to_owned(),
            last_name: "Lee".to_owned(),
            username: "ana".to_owned(),
            age: 30,
            email: Some("ana@example.com".to_owned()),
            status: true,
            date_created: Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).single().expect("valid")),
        }
    }

    #[rstest]
    fn drafts_serialise_with_lowercase_keys_and_no_id() {
        let document = bson::to_document(&UserDocument::from(&draft())).expect("serialises");
        assert!(!document.contains_key("_id"));
        assert_eq!(document.get_str("firstname").ok(), Some("Ana"));
        assert_eq!(document.get_str("lastname").ok(), Some("Lee"));
        assert_eq!(document.get_i32("age").ok(), Some(30));
        assert!(document.get_datetime("datecreated").is_ok());
    }

    #[rstest]
    fn sparse_documents_decode_with_empty_defaults() {
        let object_id = ObjectId::parse_str(HEX).expect("valid object id");
        let stored: UserDocument =
            bson::from_document(doc! { "_id": object_id, "firstname": "Ana" }).expect("decodes");
        let user = User::try_from(stored).expect("maps to user");
        assert_eq!(user.id.as_str(), HEX);
        assert_eq!(user.first_name, "Ana");
        assert!(user.email.is_empty());
        assert_eq!(user.age, 0);
        assert_eq!(user.date_created, None);
    }

    #[rstest]
    fn timestamps_survive_the_bson_round_trip() {
        let mut document = UserDocument::from(&draft());
        document.id = Some(ObjectId::parse_str(HEX).expect("valid object id"));
        let user = User::try_from(document).expect("maps to user");
        assert_eq!(user.date_created, draft().date_created);
    }

    #[rstest]
    fn documents_without_an_id_are_rejected() {
        let err = User::try_from(UserDocument::from(&draft())).expect_err("missing _id");
        assert_eq!(err, UserPersistenceError::query("stored user has no _id"));
    }

    #[rstest]
    fn update_document_sets_only_the_four_fields() {
        let update = set_fields(&UserFields {
            first_name: "Bo".to_owned(),
            last_name: String::new(),
            age: 41,
            email: String::new(),
        });
        let set = update.get_document("$set").expect("$set present");
        let mut keys: Vec<_> = set.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["age", "email", "firstname", "lastname"]);
        assert_eq!(set.get_i32("age").ok(), Some(41));
        assert_eq!(set.get_str("lastname").ok(), Some(""));
    }
}
