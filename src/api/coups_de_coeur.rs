//! Curated collections ("coups de coeur") and their book membership.
//!
//! `PUT /coups-de-coeur/:id` always carries the complete membership; the
//! single-book routes toggle one link and are not coordinated with it.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::api::error::ApiResult;
use crate::api::extract::{ApiJson, AuthUser, IdPairPath, IdPath, RequireWriter};
use crate::domain::{BookSummary, CoupDeCoeur, CoupDeCoeurInput, DomainError, MembershipCheck};
use crate::infrastructure::AppState;
use crate::services::validation::{
    dedup_ids, optional_text, parse_flag, require, require_text,
};

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CoupDeCoeurQuery {
    /// `true` to list active collections only
    active: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoupDeCoeurRequest {
    title: Option<String>,
    description: Option<String>,
    audio_path: Option<String>,
    book_ids: Option<Vec<i32>>,
    active: Option<bool>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookLinkRequest {
    book_id: Option<i32>,
}

impl CoupDeCoeurRequest {
    fn into_input(self) -> Result<CoupDeCoeurInput, DomainError> {
        Ok(CoupDeCoeurInput {
            title: require_text(self.title, "title")?,
            description: optional_text(self.description),
            audio_path: optional_text(self.audio_path),
            active: self.active.unwrap_or(true),
            book_ids: dedup_ids(require(self.book_ids, "bookIds")?),
        })
    }
}

async fn load(state: &AppState, id: i32) -> Result<CoupDeCoeur, DomainError> {
    state
        .coup_de_coeur_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Coup de coeur", id))
}

#[utoipa::path(
    get,
    path = "/api/coups-de-coeur",
    params(CoupDeCoeurQuery),
    responses((status = 200, description = "Collections with their books"))
)]
pub async fn list_coups_de_coeur(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<CoupDeCoeurQuery>,
) -> ApiResult<Json<Vec<CoupDeCoeur>>> {
    let active_only = parse_flag(query.active.as_deref(), "active")?;
    Ok(Json(state.coup_de_coeur_repo.find_all(active_only).await?))
}

#[utoipa::path(
    get,
    path = "/api/coups-de-coeur/{id}",
    params(("id" = i32, Path, description = "Collection id")),
    responses((status = 200, description = "Collection"), (status = 404, description = "Unknown collection"))
)]
pub async fn get_coup_de_coeur(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<CoupDeCoeur>> {
    Ok(Json(load(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/coups-de-coeur",
    request_body = CoupDeCoeurRequest,
    responses(
        (status = 201, description = "Collection created with its books"),
        (status = 400, description = "title or bookIds missing"),
        (status = 404, description = "Unknown book, nothing created")
    )
)]
pub async fn create_coup_de_coeur(
    State(state): State<AppState>,
    _writer: RequireWriter,
    ApiJson(payload): ApiJson<CoupDeCoeurRequest>,
) -> ApiResult<(StatusCode, Json<CoupDeCoeur>)> {
    let created = state
        .coup_de_coeur_repo
        .create(payload.into_input()?)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/api/coups-de-coeur/{id}",
    params(("id" = i32, Path, description = "Collection id")),
    request_body = CoupDeCoeurRequest,
    responses(
        (status = 200, description = "Fields and membership replaced"),
        (status = 400, description = "title or bookIds missing"),
        (status = 404, description = "Unknown collection or book, nothing changed")
    )
)]
pub async fn replace_coup_de_coeur(
    State(state): State<AppState>,
    _writer: RequireWriter,
    IdPath(id): IdPath,
    ApiJson(payload): ApiJson<CoupDeCoeurRequest>,
) -> ApiResult<Json<CoupDeCoeur>> {
    let updated = state
        .coup_de_coeur_repo
        .replace(id, payload.into_input()?)
        .await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/coups-de-coeur/{id}",
    params(("id" = i32, Path, description = "Collection id")),
    responses((status = 204, description = "Collection deleted"))
)]
pub async fn delete_coup_de_coeur(
    State(state): State<AppState>,
    _writer: RequireWriter,
    IdPath(id): IdPath,
) -> ApiResult<StatusCode> {
    state.coup_de_coeur_repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/coups-de-coeur/{id}/books",
    params(("id" = i32, Path, description = "Collection id")),
    responses((status = 200, description = "Books of the collection ordered by id"))
)]
pub async fn list_books(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<Vec<BookSummary>>> {
    Ok(Json(load(&state, id).await?.books))
}

#[utoipa::path(
    get,
    path = "/api/coups-de-coeur/{id}/books/{bookId}",
    params(
        ("id" = i32, Path, description = "Collection id"),
        ("bookId" = i32, Path, description = "Book id")
    ),
    responses((status = 200, description = "Whether the book belongs to the collection"))
)]
pub async fn check_book(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPairPath(id, book_id): IdPairPath,
) -> ApiResult<Json<MembershipCheck>> {
    Ok(Json(state.coup_de_coeur_repo.has_book(id, book_id).await?))
}

async fn add(
    state: &AppState,
    id: i32,
    book_id: i32,
) -> ApiResult<(StatusCode, Json<MembershipCheck>)> {
    state.coup_de_coeur_repo.add_book(id, book_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(MembershipCheck {
            coup_de_coeur_id: id,
            book_id,
            exists: true,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/coups-de-coeur/{id}/books",
    params(("id" = i32, Path, description = "Collection id")),
    request_body = BookLinkRequest,
    responses(
        (status = 201, description = "Book added"),
        (status = 409, description = "Book already in the collection")
    )
)]
pub async fn add_book(
    State(state): State<AppState>,
    _writer: RequireWriter,
    IdPath(id): IdPath,
    ApiJson(payload): ApiJson<BookLinkRequest>,
) -> ApiResult<(StatusCode, Json<MembershipCheck>)> {
    let book_id = require(payload.book_id, "bookId")?;
    add(&state, id, book_id).await
}

#[utoipa::path(
    post,
    path = "/api/coups-de-coeur/{id}/books/{bookId}",
    params(
        ("id" = i32, Path, description = "Collection id"),
        ("bookId" = i32, Path, description = "Book id")
    ),
    responses(
        (status = 201, description = "Book added"),
        (status = 409, description = "Book already in the collection")
    )
)]
pub async fn add_book_by_path(
    State(state): State<AppState>,
    _writer: RequireWriter,
    IdPairPath(id, book_id): IdPairPath,
) -> ApiResult<(StatusCode, Json<MembershipCheck>)> {
    add(&state, id, book_id).await
}

#[utoipa::path(
    delete,
    path = "/api/coups-de-coeur/{id}/books",
    params(("id" = i32, Path, description = "Collection id")),
    request_body = BookLinkRequest,
    responses(
        (status = 204, description = "Book removed"),
        (status = 404, description = "Book not in the collection")
    )
)]
pub async fn remove_book(
    State(state): State<AppState>,
    _writer: RequireWriter,
    IdPath(id): IdPath,
    ApiJson(payload): ApiJson<BookLinkRequest>,
) -> ApiResult<StatusCode> {
    let book_id = require(payload.book_id, "bookId")?;
    state.coup_de_coeur_repo.remove_book(id, book_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/coups-de-coeur/{id}/books/{bookId}",
    params(
        ("id" = i32, Path, description = "Collection id"),
        ("bookId" = i32, Path, description = "Book id")
    ),
    responses(
        (status = 204, description = "Book removed"),
        (status = 404, description = "Book not in the collection")
    )
)]
pub async fn remove_book_by_path(
    State(state): State<AppState>,
    _writer: RequireWriter,
    IdPairPath(id, book_id): IdPairPath,
) -> ApiResult<StatusCode> {
    state.coup_de_coeur_repo.remove_book(id, book_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
