use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::error::ApiResult;
use crate::api::extract::{ApiJson, AuthUser, IdPath, RequireWriter};
use crate::domain::{CreateOrderInput, DomainError, Order};
use crate::infrastructure::AppState;
use crate::services::validation::{optional_date, optional_text, require};
use crate::utils::time::now_rfc3339;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    reader_id: Option<i32>,
    book_id: Option<i32>,
    order_date: Option<String>,
    notes: Option<String>,
}

#[utoipa::path(get, path = "/api/orders", responses((status = 200, description = "Orders, newest first")))]
pub async fn list_orders(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<Order>>> {
    Ok(Json(state.order_repo.find_all().await?))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = i32, Path, description = "Order id")),
    responses((status = 200, description = "Order"), (status = 404, description = "Unknown order"))
)]
pub async fn get_order(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<Order>> {
    let order = state
        .order_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Order", id))?;
    Ok(Json(order))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created"),
        (status = 404, description = "Unknown reader or book")
    )
)]
pub async fn create_order(
    State(state): State<AppState>,
    _writer: RequireWriter,
    ApiJson(payload): ApiJson<CreateOrderRequest>,
) -> ApiResult<(StatusCode, Json<Order>)> {
    let input = CreateOrderInput {
        reader_id: require(payload.reader_id, "readerId")?,
        book_id: require(payload.book_id, "bookId")?,
        order_date: optional_date("orderDate", payload.order_date)?.unwrap_or_else(now_rfc3339),
        notes: optional_text(payload.notes),
    };

    let order = state.order_repo.create(input).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    params(("id" = i32, Path, description = "Order id")),
    responses((status = 204, description = "Order deleted"))
)]
pub async fn delete_order(
    State(state): State<AppState>,
    _writer: RequireWriter,
    IdPath(id): IdPath,
) -> ApiResult<StatusCode> {
    state.order_repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
