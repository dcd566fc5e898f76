//! Path parameter validation for the HTTP adapter.

use serde_json::json;

use crate::domain::{Error, UserId};

/// Parse a path segment as a user identifier.
///
/// Anything that is not 24 hex digits is a client error carrying
/// `details.field = "id"` and `details.code = "invalid_object_id"`.
pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|err| {
        Error::invalid_request(format!("invalid user id: {err}")).with_details(json!({
            "field": "id",
            "value": raw,
            "code": "invalid_object_id",
        }))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    #[case("65a1f0c2e4b0a1b2c3d4e5f6")]
    #[case("65A1F0C2E4B0A1B2C3D4E5F6")]
    fn accepts_object_id_hex(#[case] raw: &str) {
        let id = parse_user_id(raw).expect("valid id");
        assert_eq!(id.as_str(), raw.to_ascii_lowercase());
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("65a1f0c2e4b0a1b2c3d4e5fz")]
    #[case("65a1f0c2e4b0a1b2c3d4e5f6a")]
    fn rejects_everything_else(#[case] raw: &str) {
        let err = parse_user_id(raw).expect_err("invalid id");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let details = err.details().expect("details present");
        assert_eq!(details.get("field").and_then(Value::as_str), Some("id"));
        assert_eq!(
            details.get("code").and_then(Value::as_str),
            Some("invalid_object_id")
        );
        assert_eq!(details.get("value").and_then(Value::as_str), Some(raw));
    }
}
