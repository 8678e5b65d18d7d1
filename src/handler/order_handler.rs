use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use std::sync::Arc;

use crate::dto::order_dto::{
    CancelOrderRequest, CreateOrderRequest, ReturnDecisionRequest, ReturnOrderRequest,
    UpdateOrderStatusRequest,
};
use crate::dto::product_dto::PageQuery;
use crate::handler::{parse_object_id, validate_payload};
use crate::middlewares::auth_middleware::AuthUser;
use crate::model::order::{OrderStatus, ReturnStatus};
use crate::service::order_service::{OrderService, OrderServiceImpl};
use crate::util::error::HandlerError;

pub async fn create_order_handler(
    State(service): State<Arc<OrderServiceImpl>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    validate_payload(&payload)?;
    let order = service.create_order(user.id, payload).await?;
    Ok(Json(order))
}

pub async fn list_my_orders_handler(
    State(service): State<Arc<OrderServiceImpl>>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse, HandlerError> {
    let orders = service.list_my_orders(user.id).await?;
    Ok(Json(orders))
}

pub async fn get_order_handler(
    State(service): State<Arc<OrderServiceImpl>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let order = service.get_order(parse_object_id(&id)?, user.id, user.role).await?;
    Ok(Json(order))
}

pub async fn cancel_order_handler(
    State(service): State<Arc<OrderServiceImpl>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(payload): Json<CancelOrderRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    validate_payload(&payload)?;
    let order = service.cancel_order(parse_object_id(&id)?, user.id, payload.reason).await?;
    Ok(Json(order))
}

pub async fn request_return_handler(
    State(service): State<Arc<OrderServiceImpl>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(payload): Json<ReturnOrderRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    validate_payload(&payload)?;
    let order = service.request_return(parse_object_id(&id)?, user.id, payload.reason).await?;
    Ok(Json(order))
}

// --- admin surface ---

pub async fn list_all_orders_handler(
    State(service): State<Arc<OrderServiceImpl>>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let response = service
        .list_all_orders(query.page.unwrap_or(1), query.limit.unwrap_or(20))
        .await?;
    Ok(Json(response))
}

pub async fn update_order_status_handler(
    State(service): State<Arc<OrderServiceImpl>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    validate_payload(&payload)?;
    let status = OrderStatus::parse(&payload.status)
        .ok_or_else(|| HandlerError::bad_request(format!("Unknown order status '{}'", payload.status)))?;
    let order = service
        .update_status(parse_object_id(&id)?, status, payload.tracking_number)
        .await?;
    Ok(Json(order))
}

pub async fn decide_return_handler(
    State(service): State<Arc<OrderServiceImpl>>,
    Path(id): Path<String>,
    Json(payload): Json<ReturnDecisionRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    validate_payload(&payload)?;
    let decision = ReturnStatus::parse(&payload.return_status).ok_or_else(|| {
        HandlerError::bad_request(format!("Unknown return status '{}'", payload.return_status))
    })?;
    let order = service.decide_return(parse_object_id(&id)?, decision).await?;
    Ok(Json(order))
}
