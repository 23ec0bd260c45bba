use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::error::ApiResult;
use crate::api::extract::{ApiJson, AuthUser, IdPath, RequireWriter};
use crate::domain::{DomainError, Genre};
use crate::infrastructure::AppState;
use crate::services::validation::require_text;

#[derive(Deserialize, ToSchema)]
pub struct GenreRequest {
    name: Option<String>,
}

#[utoipa::path(get, path = "/api/genres", responses((status = 200, description = "Genres by name")))]
pub async fn list_genres(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<Genre>>> {
    Ok(Json(state.genre_repo.find_all().await?))
}

#[utoipa::path(
    get,
    path = "/api/genres/{id}",
    params(("id" = i32, Path, description = "Genre id")),
    responses((status = 200, description = "Genre"), (status = 404, description = "Unknown genre"))
)]
pub async fn get_genre(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<Genre>> {
    let genre = state
        .genre_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Genre", id))?;
    Ok(Json(genre))
}

#[utoipa::path(
    post,
    path = "/api/genres",
    request_body = GenreRequest,
    responses((status = 201, description = "Genre created"), (status = 409, description = "Name taken"))
)]
pub async fn create_genre(
    State(state): State<AppState>,
    _writer: RequireWriter,
    ApiJson(payload): ApiJson<GenreRequest>,
) -> ApiResult<(StatusCode, Json<Genre>)> {
    let name = require_text(payload.name, "name")?;
    let genre = state.genre_repo.create(name).await?;
    Ok((StatusCode::CREATED, Json(genre)))
}

#[utoipa::path(
    put,
    path = "/api/genres/{id}",
    params(("id" = i32, Path, description = "Genre id")),
    request_body = GenreRequest,
    responses((status = 200, description = "Genre renamed"), (status = 404, description = "Unknown genre"))
)]
pub async fn update_genre(
    State(state): State<AppState>,
    _writer: RequireWriter,
    IdPath(id): IdPath,
    ApiJson(payload): ApiJson<GenreRequest>,
) -> ApiResult<Json<Genre>> {
    let name = require_text(payload.name, "name")?;
    Ok(Json(state.genre_repo.update(id, name).await?))
}

#[utoipa::path(
    delete,
    path = "/api/genres/{id}",
    params(("id" = i32, Path, description = "Genre id")),
    responses((status = 204, description = "Genre deleted"))
)]
pub async fn delete_genre(
    State(state): State<AppState>,
    _writer: RequireWriter,
    IdPath(id): IdPath,
) -> ApiResult<StatusCode> {
    state.genre_repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
