//! Assignment endpoints and the per-assignment reader history.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::api::error::ApiResult;
use crate::api::extract::{ApiJson, AuthUser, IdPath, RequireWriter};
use crate::domain::{
    Assignment, AssignmentReaderEntry, CreateAssignmentInput, DomainError, RecordReaderInput,
    UpdateAssignmentInput,
};
use crate::infrastructure::AppState;
use crate::services::validation::{
    nullable_date, optional_date, optional_text, parse_id, require,
};

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AssignmentQuery {
    /// Return this single assignment instead of the list
    id: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssignmentRequest {
    reader_id: Option<i32>,
    catalogue_id: Option<i32>,
    order_id: Option<i32>,
    reception_date: Option<String>,
    sent_to_reader_date: Option<String>,
    #[serde(rename = "returnedToECADate")]
    returned_to_eca_date: Option<String>,
    status_id: Option<i32>,
    notes: Option<String>,
}

/// Partial update; `null` clears a nullable field, an absent key keeps it.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssignmentRequest {
    reader_id: Option<i32>,
    catalogue_id: Option<i32>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    order_id: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    reception_date: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    sent_to_reader_date: Option<Option<String>>,
    #[serde(
        rename = "returnedToECADate",
        default,
        with = "::serde_with::rust::double_option"
    )]
    #[schema(value_type = Option<String>)]
    returned_to_eca_date: Option<Option<String>>,
    status_id: Option<i32>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    notes: Option<Option<String>>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordReaderRequest {
    reader_id: Option<i32>,
    notes: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/assignments",
    params(AssignmentQuery),
    responses(
        (status = 200, description = "Assignments, newest first, or one assignment"),
        (status = 404, description = "Assignment not found")
    )
)]
pub async fn list_assignments(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<AssignmentQuery>,
) -> ApiResult<Response> {
    if let Some(raw) = query.id {
        let id = parse_id(&raw, "id")?;
        let assignment = state
            .assignment_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Assignment not found".to_string()))?;
        return Ok(Json(assignment).into_response());
    }

    let assignments = state.assignment_repo.find_all().await?;
    Ok(Json(assignments).into_response())
}

#[utoipa::path(
    get,
    path = "/api/assignments/{id}",
    params(("id" = i32, Path, description = "Assignment id")),
    responses((status = 200, description = "Assignment"), (status = 404, description = "Assignment not found"))
)]
pub async fn get_assignment(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<Assignment>> {
    let assignment = state
        .assignment_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::NotFound("Assignment not found".to_string()))?;
    Ok(Json(assignment))
}

#[utoipa::path(
    post,
    path = "/api/assignments",
    request_body = CreateAssignmentRequest,
    responses(
        (status = 201, description = "Assignment created"),
        (status = 400, description = "readerId, catalogueId or statusId missing"),
        (status = 404, description = "Referenced reader, book, order or status missing")
    )
)]
pub async fn create_assignment(
    State(state): State<AppState>,
    _writer: RequireWriter,
    ApiJson(payload): ApiJson<CreateAssignmentRequest>,
) -> ApiResult<(StatusCode, Json<Assignment>)> {
    let input = CreateAssignmentInput {
        reader_id: require(payload.reader_id, "readerId")?,
        catalogue_id: require(payload.catalogue_id, "catalogueId")?,
        status_id: require(payload.status_id, "statusId")?,
        order_id: payload.order_id,
        reception_date: optional_date("receptionDate", payload.reception_date)?,
        sent_to_reader_date: optional_date("sentToReaderDate", payload.sent_to_reader_date)?,
        returned_to_eca_date: optional_date("returnedToECADate", payload.returned_to_eca_date)?,
        notes: optional_text(payload.notes),
    };

    let assignment = state.assignment_repo.create(input).await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

#[utoipa::path(
    put,
    path = "/api/assignments/{id}",
    params(("id" = i32, Path, description = "Assignment id")),
    request_body = UpdateAssignmentRequest,
    responses((status = 200, description = "Assignment updated"), (status = 404, description = "Assignment or reference missing"))
)]
pub async fn update_assignment(
    State(state): State<AppState>,
    _writer: RequireWriter,
    IdPath(id): IdPath,
    ApiJson(payload): ApiJson<UpdateAssignmentRequest>,
) -> ApiResult<Json<Assignment>> {
    let input = UpdateAssignmentInput {
        reader_id: payload.reader_id,
        catalogue_id: payload.catalogue_id,
        order_id: payload.order_id,
        reception_date: nullable_date("receptionDate", payload.reception_date)?,
        sent_to_reader_date: nullable_date("sentToReaderDate", payload.sent_to_reader_date)?,
        returned_to_eca_date: nullable_date("returnedToECADate", payload.returned_to_eca_date)?,
        status_id: payload.status_id,
        notes: payload.notes.map(optional_text),
    };

    Ok(Json(state.assignment_repo.update(id, input).await?))
}

#[utoipa::path(
    delete,
    path = "/api/assignments/{id}",
    params(("id" = i32, Path, description = "Assignment id")),
    responses((status = 204, description = "Assignment deleted, history kept"))
)]
pub async fn delete_assignment(
    State(state): State<AppState>,
    _writer: RequireWriter,
    IdPath(id): IdPath,
) -> ApiResult<StatusCode> {
    state.assignment_repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/assignments/{id}/readers",
    params(("id" = i32, Path, description = "Assignment id")),
    responses(
        (status = 200, description = "Reader history, most recent first"),
        (status = 404, description = "Assignment not found")
    )
)]
pub async fn list_readers(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<Vec<AssignmentReaderEntry>>> {
    Ok(Json(state.history_repo.list_for_assignment(id).await?))
}

/// Appends to the history only; the assignment's own reader is left as is.
#[utoipa::path(
    post,
    path = "/api/assignments/{id}/readers",
    params(("id" = i32, Path, description = "Assignment id")),
    request_body = RecordReaderRequest,
    responses(
        (status = 201, description = "History entry recorded"),
        (status = 400, description = "readerId missing"),
        (status = 404, description = "Assignment or reader not found")
    )
)]
pub async fn record_reader(
    State(state): State<AppState>,
    _writer: RequireWriter,
    IdPath(id): IdPath,
    ApiJson(payload): ApiJson<RecordReaderRequest>,
) -> ApiResult<(StatusCode, Json<AssignmentReaderEntry>)> {
    let input = RecordReaderInput {
        reader_id: require(payload.reader_id, "readerId")?,
        notes: optional_text(payload.notes),
    };

    let entry = state.history_repo.record(id, input).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}
