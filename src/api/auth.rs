use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::error::ApiResult;
use crate::api::extract::{ApiJson, AuthUser};
use crate::auth::{create_jwt, verify_password};
use crate::domain::{DomainError, User};
use crate::infrastructure::AppState;

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    token: String,
    user: User,
}

fn invalid_credentials() -> DomainError {
    DomainError::Unauthorized("Invalid credentials".to_string())
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let email = payload.email.trim().to_lowercase();
    tracing::info!("Login attempt for {}", email);

    let Some((user, password_hash)) = state.user_repo.find_credentials(&email).await? else {
        tracing::warn!("Unknown account: {}", email);
        return Err(invalid_credentials().into());
    };

    match verify_password(&payload.password, &password_hash) {
        Ok(true) => {}
        _ => {
            tracing::warn!("Password verification failed for user {}", user.id);
            return Err(invalid_credentials().into());
        }
    }

    let token = create_jwt(user.id, &user.role).map_err(DomainError::Internal)?;
    tracing::info!(user_id = user.id, role = %user.role, "Login succeeded");

    Ok(Json(LoginResponse { token, user }))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Authenticated user"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<User>> {
    let user = state
        .user_repo
        .find_by_id(auth.id)
        .await?
        .ok_or_else(|| DomainError::Unauthorized("User no longer exists".to_string()))?;

    Ok(Json(user))
}
