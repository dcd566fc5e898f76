//! User record model.
//!
//! A user is a flat document: two name fields, a free-form username, an age,
//! an email address, an opaque status flag and an optional creation
//! timestamp. The store assigns the identifier.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use validator::Validate;

/// Validation errors returned when parsing a [`UserId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user id must not be empty")]
    EmptyId,
    #[error("user id must be a 24 character hexadecimal object id")]
    InvalidId,
}

/// Store-assigned user identifier, rendered as 24 lowercase hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(String);

static OBJECT_ID_RE: OnceLock<Regex> = OnceLock::new();

fn object_id_regex() -> &'static Regex {
    OBJECT_ID_RE.get_or_init(|| {
        Regex::new("^[0-9a-fA-F]{24}$")
            .unwrap_or_else(|error| panic!("object id regex failed to compile: {error}"))
    })
}

impl UserId {
    /// Validate and construct a [`UserId`] from hex input.
    ///
    /// # Examples
    /// ```
    /// use userinfo::domain::UserId;
    ///
    /// let id = UserId::new("65A1F0C2E4B0A1B2C3D4E5F6").expect("valid id");
    /// assert_eq!(id.as_str(), "65a1f0c2e4b0a1b2c3d4e5f6");
    /// assert!(UserId::new("not-an-id").is_err());
    /// ```
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if !object_id_regex().is_match(raw) {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    /// Borrow the hex form.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Candidate user submitted for creation.
///
/// Field rules:
/// - `first_name`, `last_name`: ASCII letters only; empty passes.
/// - `email`: required and syntactically valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct UserDraft {
    #[validate(custom(function = "crate::domain::validation::alphabetic"))]
    pub first_name: String,
    #[validate(custom(function = "crate::domain::validation::alphabetic"))]
    pub last_name: String,
    pub username: String,
    pub age: u8,
    #[validate(required, email)]
    pub email: Option<String>,
    pub status: bool,
    pub date_created: Option<DateTime<Utc>>,
}

impl UserDraft {
    /// Materialise the draft as a stored user under `id`.
    pub fn into_user(self, id: UserId) -> User {
        let Self {
            first_name,
            last_name,
            username,
            age,
            email,
            status,
            date_created,
        } = self;
        User {
            id,
            first_name,
            last_name,
            username,
            age,
            email: email.unwrap_or_default(),
            status,
            date_created,
        }
    }
}

/// The four fields an update overwrites.
///
/// Updates never merge: a field missing from the request arrives here as its
/// empty or zero value and replaces whatever was stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFields {
    pub first_name: String,
    pub last_name: String,
    pub age: u8,
    pub email: String,
}

/// Persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub age: u8,
    pub email: String,
    /// Opaque flag stored as supplied.
    pub status: bool,
    /// Caller-supplied creation time; the service never fills it in.
    pub date_created: Option<DateTime<Utc>>,
}

impl User {
    /// Overwrite the updatable fields unconditionally.
    ///
    /// # Examples
    /// ```
    /// use userinfo::domain::{UserDraft, UserFields, UserId};
    ///
    /// let id = UserId::new("000000000000000000000001").expect("valid id");
    /// let mut user = UserDraft {
    ///     first_name: "Ana".into(),
    ///     username: "ana".into(),
    ///     age: 30,
    ///     email: Some("ana@example.com".into()),
    ///     ..UserDraft::default()
    /// }
    /// .into_user(id);
    ///
    /// user.apply(UserFields { age: 31, ..UserFields::default() });
    /// assert_eq!(user.age, 31);
    /// assert!(user.first_name.is_empty());
    /// assert_eq!(user.username, "ana");
    /// ```
    pub fn apply(&mut self, fields: UserFields) {
        let UserFields {
            first_name,
            last_name,
            age,
            email,
        } = fields;
        self.first_name = first_name;
        self.last_name = last_name;
        self.age = age;
        self.email = email;
    }
}
