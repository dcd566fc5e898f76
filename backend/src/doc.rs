//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every users endpoint, the health probes and the
//! request, response and error schemas. Swagger UI serves it in debug builds
//! and `cargo run --bin openapi-dump` prints it for external tooling.

use utoipa::OpenApi;

use crate::domain::ErrorCode;
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::users::{DeletedResponse, InsertedResponse, UserRequest, UserResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "userinfo API",
        description = "CRUD over user records stored in MongoDB, plus health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserRequest,
        UserResponse,
        InsertedResponse,
        DeletedResponse,
        ErrorResponse,
        ErrorCode
    )),
    tags(
        (name = "users", description = "Operations on user records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
