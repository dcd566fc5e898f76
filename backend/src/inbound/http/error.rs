//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and status
//! codes. Body decode and path extraction failures go through the same
//! envelope.

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// JSON error envelope returned by every failing endpoint.
///
/// Example JSON:
/// `{"status":404,"code":"not_found","message":"user 65a1f0c2e4b0a1b2c3d4e5f6 not found","traceId":"…"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// HTTP status code, repeated in the body.
    #[schema(example = 404)]
    pub status: u16,
    pub code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn strip_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        error.clone().without_details()
    } else {
        error.clone()
    }
}

impl From<&Error> for ErrorResponse {
    fn from(error: &Error) -> Self {
        let visible = strip_if_internal(error);
        Self {
            status: status_for(visible.code()).as_u16(),
            code: visible.code(),
            message: visible.message().to_owned(),
            trace_id: visible.trace_id().map(str::to_owned),
            details: visible.details().cloned(),
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(ErrorResponse::from(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("internal server error")
    }
}

fn json_error(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!(path = %req.path(), error = %err, "rejected request body");
    Error::invalid_request(format!("malformed JSON body: {err}")).into()
}

fn path_error(err: PathError, req: &HttpRequest) -> actix_web::Error {
    warn!(path = %req.path(), error = %err, "rejected path parameters");
    Error::invalid_request(format!("malformed path: {err}")).into()
}

/// JSON extractor configuration rendering decode failures as 400 envelopes.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error)
}

/// Path extractor configuration rendering decode failures as 400 envelopes.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error)
}

#[cfg(test)]
mod tests;
