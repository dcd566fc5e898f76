//! Users API handlers.
//!
//! ```text
//! GET    /api/users
//! GET    /api/user/{id}
//! POST   /api/user        {"firstname":"Ana","lastname":"Lee","email":"ana@example.com","age":30}
//! PUT    /api/user/{id}   {"firstname":"Ana","lastname":"Lee","email":"ana2@example.com","age":31}
//! DELETE /api/user/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{User, UserDraft, UserFields};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_user_id;

/// Request body for `POST /api/user` and `PUT /api/user/{id}`.
///
/// Every key is optional on the wire. On create, a missing `email` fails
/// validation; on update only `firstname`, `lastname`, `age` and `email` are
/// read and missing ones overwrite with empty values.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct UserRequest {
    #[schema(example = "Ana")]
    pub firstname: String,
    #[schema(example = "Lee")]
    pub lastname: String,
    pub username: String,
    #[schema(example = 30)]
    pub age: u8,
    #[schema(example = "ana@example.com")]
    pub email: Option<String>,
    pub status: bool,
    pub datecreated: Option<DateTime<Utc>>,
}

impl From<UserRequest> for UserDraft {
    fn from(value: UserRequest) -> Self {
        Self {
            first_name: value.firstname,
            last_name: value.lastname,
            username: value.username,
            age: value.age,
            email: value.email,
            status: value.status,
            date_created: value.datecreated,
        }
    }
}

impl From<UserRequest> for UserFields {
    fn from(value: UserRequest) -> Self {
        Self {
            first_name: value.firstname,
            last_name: value.lastname,
            age: value.age,
            email: value.email.unwrap_or_default(),
        }
    }
}

/// Stored user as returned by the API.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct UserResponse {
    /// 24 lowercase hex digits.
    #[schema(example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub username: String,
    pub age: u8,
    pub email: String,
    pub status: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datecreated: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.into(),
            firstname: user.first_name,
            lastname: user.last_name,
            username: user.username,
            age: user.age,
            email: user.email,
            status: user.status,
            datecreated: user.date_created,
        }
    }
}

/// Body of a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertedResponse {
    #[schema(example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    pub inserted_id: String,
}

/// Body of a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletedResponse {
    #[schema(example = 1)]
    pub deleted_count: u64,
}

/// List every stored user.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use userinfo::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users", body = [UserResponse]),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users_query.list_users().await?;
    Ok(web::Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/api/user/{id}",
    params(("id" = String, Path, description = "User identifier (24 hex digits)")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 400, description = "Malformed identifier", body = ErrorResponse),
        (status = 404, description = "No such user", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/user/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = parse_user_id(&path)?;
    let user = state.users_query.get_user(&id).await?;
    Ok(web::Json(user.into()))
}

/// Validate and insert a user.
#[utoipa::path(
    post,
    path = "/api/user",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created", body = InsertedResponse),
        (status = 400, description = "Malformed body or failed validation", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/user")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserRequest>,
) -> ApiResult<HttpResponse> {
    let id = state
        .users_command
        .create_user(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(InsertedResponse {
        inserted_id: id.into(),
    }))
}

/// Overwrite `firstname`, `lastname`, `age` and `email`.
///
/// The body is not validated and nothing is merged: omitted fields are
/// stored as empty strings or zero.
#[utoipa::path(
    put,
    path = "/api/user/{id}",
    params(("id" = String, Path, description = "User identifier (24 hex digits)")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Malformed identifier or body", body = ErrorResponse),
        (status = 404, description = "No such user", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/user/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = parse_user_id(&path)?;
    let user = state
        .users_command
        .update_user(&id, payload.into_inner().into())
        .await?;
    Ok(web::Json(user.into()))
}

/// Delete one user.
#[utoipa::path(
    delete,
    path = "/api/user/{id}",
    params(("id" = String, Path, description = "User identifier (24 hex digits)")),
    responses(
        (status = 200, description = "User deleted", body = DeletedResponse),
        (status = 400, description = "Malformed identifier", body = ErrorResponse),
        (status = 404, description = "No such user", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/user/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeletedResponse>> {
    let id = parse_user_id(&path)?;
    let deleted_count = state.users_command.delete_user(&id).await?;
    Ok(web::Json(DeletedResponse { deleted_count }))
}
