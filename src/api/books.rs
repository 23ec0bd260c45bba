use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::api::error::ApiResult;
use crate::api::extract::{ApiJson, AuthUser, IdPath, RequireWriter};
use crate::domain::{Book, BookFilter, CreateBookInput, DomainError, UpdateBookInput};
use crate::infrastructure::AppState;
use crate::services::validation::{dedup_ids, optional_text, parse_id, require_text};

#[derive(Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Only books in this genre
    genre_id: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    title: Option<String>,
    author: Option<String>,
    narrator: Option<String>,
    summary: Option<String>,
    isbn: Option<String>,
    duration_minutes: Option<i32>,
    cover_path: Option<String>,
    audio_path: Option<String>,
    genre_ids: Option<Vec<i32>>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    title: Option<String>,
    author: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    narrator: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    summary: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    isbn: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    duration_minutes: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    cover_path: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    audio_path: Option<Option<String>>,
    genre_ids: Option<Vec<i32>>,
}

fn check_duration(minutes: Option<i32>) -> Result<Option<i32>, DomainError> {
    match minutes {
        Some(m) if m < 0 => Err(DomainError::validation(
            "durationMinutes must not be negative",
        )),
        other => Ok(other),
    }
}

#[utoipa::path(
    get,
    path = "/api/books",
    params(BookQuery),
    responses((status = 200, description = "Books ordered by title"))
)]
pub async fn list_books(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<BookQuery>,
) -> ApiResult<Json<Vec<Book>>> {
    let filter = BookFilter {
        genre_id: query
            .genre_id
            .as_deref()
            .map(|raw| parse_id(raw, "genreId"))
            .transpose()?,
    };

    Ok(Json(state.book_repo.find_all(filter).await?))
}

#[utoipa::path(
    get,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses((status = 200, description = "Book with genres"), (status = 404, description = "Unknown book"))
)]
pub async fn get_book(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<Book>> {
    let book = state
        .book_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Book", id))?;
    Ok(Json(book))
}

#[utoipa::path(
    post,
    path = "/api/books",
    request_body = CreateBookRequest,
    responses(
        (status = 201, description = "Book created"),
        (status = 400, description = "Missing title or author"),
        (status = 404, description = "Unknown genre")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    _writer: RequireWriter,
    ApiJson(payload): ApiJson<CreateBookRequest>,
) -> ApiResult<(StatusCode, Json<Book>)> {
    let input = CreateBookInput {
        title: require_text(payload.title, "title")?,
        author: require_text(payload.author, "author")?,
        narrator: optional_text(payload.narrator),
        summary: optional_text(payload.summary),
        isbn: optional_text(payload.isbn),
        duration_minutes: check_duration(payload.duration_minutes)?,
        cover_path: optional_text(payload.cover_path),
        audio_path: optional_text(payload.audio_path),
        genre_ids: dedup_ids(payload.genre_ids.unwrap_or_default()),
    };

    let book = state.book_repo.create(input).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

#[utoipa::path(
    put,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    request_body = UpdateBookRequest,
    responses((status = 200, description = "Book updated"), (status = 404, description = "Unknown book or genre"))
)]
pub async fn update_book(
    State(state): State<AppState>,
    _writer: RequireWriter,
    IdPath(id): IdPath,
    ApiJson(payload): ApiJson<UpdateBookRequest>,
) -> ApiResult<Json<Book>> {
    let input = UpdateBookInput {
        title: payload
            .title
            .map(|t| require_text(Some(t), "title"))
            .transpose()?,
        author: payload
            .author
            .map(|a| require_text(Some(a), "author"))
            .transpose()?,
        narrator: payload.narrator.map(optional_text),
        summary: payload.summary.map(optional_text),
        isbn: payload.isbn.map(optional_text),
        duration_minutes: payload.duration_minutes.map(check_duration).transpose()?,
        cover_path: payload.cover_path.map(optional_text),
        audio_path: payload.audio_path.map(optional_text),
        genre_ids: payload.genre_ids.map(dedup_ids),
    };

    Ok(Json(state.book_repo.update(id, input).await?))
}

#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses((status = 204, description = "Book deleted"), (status = 409, description = "Book still assigned"))
)]
pub async fn delete_book(
    State(state): State<AppState>,
    _writer: RequireWriter,
    IdPath(id): IdPath,
) -> ApiResult<StatusCode> {
    state.book_repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
