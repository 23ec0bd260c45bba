use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::error::ApiResult;
use crate::api::extract::{ApiJson, IdPath, RequireAdmin, RequireWriter};
use crate::auth::hash_password;
use crate::domain::{CreateUserInput, DomainError, Role, UpdateUserInput, User};
use crate::infrastructure::AppState;
use crate::services::validation::{optional_text, require, require_text};

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    email: Option<String>,
    name: Option<String>,
    first_name: Option<String>,
    password: Option<String>,
    role: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    email: Option<String>,
    name: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    first_name: Option<Option<String>>,
    password: Option<String>,
    role: Option<String>,
}

fn parse_email(raw: Option<String>) -> Result<String, DomainError> {
    let email = require_text(raw, "email")?.to_lowercase();
    if !email.contains('@') {
        return Err(DomainError::validation(format!(
            "email '{}' is not a valid address",
            email
        )));
    }
    Ok(email)
}

fn parse_role(raw: &str) -> Result<Role, DomainError> {
    raw.trim().parse::<Role>().map_err(|_| {
        DomainError::validation(format!(
            "role must be one of admin, staff, reader (got '{}')",
            raw
        ))
    })
}

fn hash(password: &str) -> Result<String, DomainError> {
    if password.is_empty() {
        return Err(DomainError::validation("password must not be empty"));
    }
    hash_password(password).map_err(DomainError::Internal)
}

#[utoipa::path(get, path = "/api/users", responses((status = 200, description = "All users")))]
pub async fn list_users(
    State(state): State<AppState>,
    _writer: RequireWriter,
) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(state.user_repo.find_all().await?))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses((status = 200, description = "User"), (status = 404, description = "Unknown user"))
)]
pub async fn get_user(
    State(state): State<AppState>,
    _writer: RequireWriter,
    IdPath(id): IdPath,
) -> ApiResult<Json<User>> {
    let user = state
        .user_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("User", id))?;
    Ok(Json(user))
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses((status = 201, description = "User created"), (status = 409, description = "Email taken"))
)]
pub async fn create_user(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ApiJson(payload): ApiJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let email = parse_email(payload.email)?;
    let name = require_text(payload.name, "name")?;
    let password = require(payload.password, "password")?;
    let role = match payload.role {
        Some(raw) => parse_role(&raw)?,
        None => Role::Reader,
    };

    let user = state
        .user_repo
        .create(CreateUserInput {
            email,
            name,
            first_name: optional_text(payload.first_name),
            password_hash: hash(&password)?,
            role,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses((status = 200, description = "User updated"), (status = 404, description = "Unknown user"))
)]
pub async fn update_user(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    IdPath(id): IdPath,
    ApiJson(payload): ApiJson<UpdateUserRequest>,
) -> ApiResult<Json<User>> {
    let input = UpdateUserInput {
        email: payload.email.map(|e| parse_email(Some(e))).transpose()?,
        name: payload
            .name
            .map(|n| require_text(Some(n), "name"))
            .transpose()?,
        first_name: payload.first_name.map(optional_text),
        password_hash: payload.password.as_deref().map(hash).transpose()?,
        role: payload.role.as_deref().map(parse_role).transpose()?,
    };

    Ok(Json(state.user_repo.update(id, input).await?))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses((status = 204, description = "User deleted"), (status = 409, description = "User still referenced"))
)]
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    IdPath(id): IdPath,
) -> ApiResult<StatusCode> {
    if admin.id == id {
        return Err(DomainError::Conflict("You cannot delete your own account".into()).into());
    }
    state.user_repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
