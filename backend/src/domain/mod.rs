//! Domain primitives, ports and the user service.
//!
//! Purpose: define the user record, its field rules and the use-cases the
//! HTTP adapter drives, without depending on actix-web or MongoDB.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failures.
//! - TraceId: request correlation identifier held in task-local storage.
//! - User, UserDraft, UserFields, UserId: the record and its inputs.
//! - validate_draft / FieldViolation / ValidationFailure: field rules.
//! - UserService: implementation of the `UsersQuery` and `UsersCommand` ports.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_service;
pub mod validation;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::trace_id::TraceId;
pub use self::user::{User, UserDraft, UserFields, UserId, UserValidationError};
pub use self::user_service::UserService;
pub use self::validation::{FieldViolation, ValidationFailure, validate_draft};
