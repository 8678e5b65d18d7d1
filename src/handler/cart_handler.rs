use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use std::sync::Arc;

use crate::dto::cart_dto::{AddCartItemRequest, RemoveCartItemRequest, UpdateCartItemRequest};
use crate::handler::validate_payload;
use crate::middlewares::auth_middleware::AuthUser;
use crate::service::cart_service::{CartService, CartServiceImpl};
use crate::util::error::HandlerError;

pub async fn get_cart_handler(
    State(service): State<Arc<CartServiceImpl>>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse, HandlerError> {
    let cart = service.get_cart(user.id).await?;
    Ok(Json(cart))
}

pub async fn add_item_handler(
    State(service): State<Arc<CartServiceImpl>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<AddCartItemRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    validate_payload(&payload)?;
    let cart = service.add_item(user.id, payload).await?;
    Ok(Json(cart))
}

pub async fn update_item_handler(
    State(service): State<Arc<CartServiceImpl>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<UpdateCartItemRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    validate_payload(&payload)?;
    let cart = service.update_quantity(user.id, payload).await?;
    Ok(Json(cart))
}

pub async fn remove_item_handler(
    State(service): State<Arc<CartServiceImpl>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<RemoveCartItemRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let cart = service.remove_item(user.id, payload).await?;
    Ok(Json(cart))
}

pub async fn clear_cart_handler(
    State(service): State<Arc<CartServiceImpl>>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse, HandlerError> {
    let cart = service.clear(user.id).await?;
    Ok(Json(cart))
}
