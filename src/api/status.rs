use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::error::ApiResult;
use crate::api::extract::{ApiJson, AuthUser, RequireWriter};
use crate::domain::Status;
use crate::infrastructure::AppState;
use crate::services::validation::require_text;

#[derive(Deserialize, ToSchema)]
pub struct CreateStatusRequest {
    name: Option<String>,
}

#[utoipa::path(get, path = "/api/statuses", responses((status = 200, description = "Assignment statuses")))]
pub async fn list_statuses(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<Status>>> {
    Ok(Json(state.status_repo.find_all().await?))
}

#[utoipa::path(
    post,
    path = "/api/statuses",
    request_body = CreateStatusRequest,
    responses((status = 201, description = "Status created"), (status = 409, description = "Name taken"))
)]
pub async fn create_status(
    State(state): State<AppState>,
    _writer: RequireWriter,
    ApiJson(payload): ApiJson<CreateStatusRequest>,
) -> ApiResult<(StatusCode, Json<Status>)> {
    let name = require_text(payload.name, "name")?;
    let status = state.status_repo.create(name).await?;
    Ok((StatusCode::CREATED, Json(status)))
}
