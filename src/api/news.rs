use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::api::error::ApiResult;
use crate::api::extract::{ApiJson, AuthUser, IdPath, RequireWriter};
use crate::domain::{CreateNewsInput, DomainError, News, UpdateNewsInput};
use crate::infrastructure::AppState;
use crate::services::validation::{parse_flag, require_text};

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NewsQuery {
    /// `true` to list published articles only
    published: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateNewsRequest {
    title: Option<String>,
    content: Option<String>,
    published: Option<bool>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateNewsRequest {
    title: Option<String>,
    content: Option<String>,
    published: Option<bool>,
}

#[utoipa::path(
    get,
    path = "/api/news",
    params(NewsQuery),
    responses((status = 200, description = "News, newest first"))
)]
pub async fn list_news(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<NewsQuery>,
) -> ApiResult<Json<Vec<News>>> {
    let published_only = parse_flag(query.published.as_deref(), "published")?;
    Ok(Json(state.news_repo.find_all(published_only).await?))
}

#[utoipa::path(
    get,
    path = "/api/news/{id}",
    params(("id" = i32, Path, description = "News id")),
    responses((status = 200, description = "News article"), (status = 404, description = "Unknown article"))
)]
pub async fn get_news(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<News>> {
    let item = state
        .news_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("News", id))?;
    Ok(Json(item))
}

#[utoipa::path(
    post,
    path = "/api/news",
    request_body = CreateNewsRequest,
    responses((status = 201, description = "Article created"))
)]
pub async fn create_news(
    State(state): State<AppState>,
    _writer: RequireWriter,
    ApiJson(payload): ApiJson<CreateNewsRequest>,
) -> ApiResult<(StatusCode, Json<News>)> {
    let input = CreateNewsInput {
        title: require_text(payload.title, "title")?,
        content: require_text(payload.content, "content")?,
        published: payload.published.unwrap_or(false),
    };

    let item = state.news_repo.create(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    put,
    path = "/api/news/{id}",
    params(("id" = i32, Path, description = "News id")),
    request_body = UpdateNewsRequest,
    responses((status = 200, description = "Article updated"))
)]
pub async fn update_news(
    State(state): State<AppState>,
    _writer: RequireWriter,
    IdPath(id): IdPath,
    ApiJson(payload): ApiJson<UpdateNewsRequest>,
) -> ApiResult<Json<News>> {
    let input = UpdateNewsInput {
        title: payload
            .title
            .map(|t| require_text(Some(t), "title"))
            .transpose()?,
        content: payload
            .content
            .map(|c| require_text(Some(c), "content"))
            .transpose()?,
        published: payload.published,
    };

    Ok(Json(state.news_repo.update(id, input).await?))
}

#[utoipa::path(
    delete,
    path = "/api/news/{id}",
    params(("id" = i32, Path, description = "News id")),
    responses((status = 204, description = "Article deleted"))
)]
pub async fn delete_news(
    State(state): State<AppState>,
    _writer: RequireWriter,
    IdPath(id): IdPath,
) -> ApiResult<StatusCode> {
    state.news_repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
