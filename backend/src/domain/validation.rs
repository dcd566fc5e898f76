//! Field rules for user drafts.
//!
//! The rules are declared on [`UserDraft`] with the `validator` derive; this
//! module owns the custom alphabetic rule and flattens `validator`'s error map
//! into an ordered list of [`FieldViolation`]s.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors};

use super::UserDraft;

static ALPHA_RE: OnceLock<Regex> = OnceLock::new();

fn alpha_regex() -> &'static Regex {
    ALPHA_RE.get_or_init(|| {
        Regex::new("^[A-Za-z]+$")
            .unwrap_or_else(|error| panic!("alpha regex failed to compile: {error}"))
    })
}

/// Accept empty input or ASCII letters only.
pub(crate) fn alphabetic(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || alpha_regex().is_match(value) {
        return Ok(());
    }
    let mut error = ValidationError::new("alpha");
    error.add_param(Cow::from("value"), &value);
    Err(error)
}

/// One failed rule on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Field name as it appears in request bodies.
    pub field: String,
    /// Rule that failed: `alpha`, `required` or `email`.
    pub rule: String,
    /// Offending value; absent when the field was missing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// A draft that broke at least one field rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("user failed validation on {} field(s)", .violations.len())]
pub struct ValidationFailure {
    violations: Vec<FieldViolation>,
}

impl ValidationFailure {
    /// Violations ordered by field, then rule.
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }
}

/// Check `draft` against its declared field rules.
///
/// # Examples
/// ```
/// use userinfo::domain::{UserDraft, validate_draft};
///
/// let draft = UserDraft {
///     first_name: "Ana".into(),
///     email: Some("ana@example.com".into()),
///     ..UserDraft::default()
/// };
/// assert!(validate_draft(&draft).is_ok());
///
/// let missing_email = UserDraft::default();
/// let failure = validate_draft(&missing_email).expect_err("email is required");
/// assert_eq!(failure.violations()[0].rule, "required");
/// ```
pub fn validate_draft(draft: &UserDraft) -> Result<(), ValidationFailure> {
    draft.validate().map_err(flatten)
}

fn flatten(errors: ValidationErrors) -> ValidationFailure {
    let mut violations: Vec<FieldViolation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            let field = wire_name(field.as_ref()).to_owned();
            field_errors.iter().map(move |error| FieldViolation {
                field: field.clone(),
                rule: error.code.to_string(),
                value: error
                    .params
                    .get("value")
                    .filter(|value| !value.is_null())
                    .map(render_value),
            })
        })
        .collect();
    violations.sort_by(|left, right| {
        left.field
            .cmp(&right.field)
            .then_with(|| left.rule.cmp(&right.rule))
    });
    ValidationFailure { violations }
}

fn wire_name(field: &str) -> &str {
    match field {
        "first_name" => "firstname",
        "last_name" => "lastname",
        "date_created" => "datecreated",
        other => other,
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
