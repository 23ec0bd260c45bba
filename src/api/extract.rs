//! Request extractors: authentication, role checks and strict input decoding
//!
//! All of them reject with [`ApiError`], so malformed input and missing
//! credentials produce the same JSON error body as handler failures.

use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Path};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::api::error::ApiError;
use crate::domain::{DomainError, Role};
use crate::infrastructure::auth::decode_jwt;
use crate::services::validation::parse_id;

/// Caller identity taken from a valid `Authorization: Bearer <jwt>` header.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: i32,
    pub role: Role,
}

fn unauthorized(msg: &str) -> ApiError {
    ApiError::Domain(DomainError::Unauthorized(msg.to_string()))
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| unauthorized("Missing bearer token"))?;

        let claims = decode_jwt(token.trim()).map_err(|e| {
            tracing::debug!("Rejected token: {}", e);
            unauthorized("Invalid or expired token")
        })?;

        let id = claims
            .sub
            .parse::<i32>()
            .map_err(|_| unauthorized("Invalid token subject"))?;
        let role = claims
            .role
            .parse::<Role>()
            .map_err(|_| unauthorized("Invalid token role"))?;

        Ok(AuthUser { id, role })
    }
}

/// Requires `admin` or `staff`. Rejects with 403 otherwise.
pub struct RequireWriter(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireWriter
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.role.can_write() {
            return Err(ApiError::Domain(DomainError::Forbidden(
                "Staff or admin role required".into(),
            )));
        }
        Ok(RequireWriter(user))
    }
}

/// Requires `admin`. Rejects with 403 otherwise.
pub struct RequireAdmin(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != Role::Admin {
            return Err(ApiError::Domain(DomainError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// JSON body whose decoding errors become 400 `VALIDATION_ERROR`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Single `:id` path segment, validated as a positive integer.
pub struct IdPath(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;
        Ok(IdPath(parse_id(&raw, "id")?))
    }
}

/// Two path identifiers, e.g. `/coups-de-coeur/:id/books/:bookId`.
pub struct IdPairPath(pub i32, pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for IdPairPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((first, second)) =
            Path::<(String, String)>::from_request_parts(parts, state).await?;
        Ok(IdPairPath(parse_id(&first, "id")?, parse_id(&second, "bookId")?))
    }
}
