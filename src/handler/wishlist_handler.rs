use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use std::sync::Arc;

use crate::handler::parse_object_id;
use crate::middlewares::auth_middleware::AuthUser;
use crate::service::wishlist_service::{WishlistService, WishlistServiceImpl};
use crate::util::error::HandlerError;

pub async fn get_wishlist_handler(
    State(service): State<Arc<WishlistServiceImpl>>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse, HandlerError> {
    let wishlist = service.get_wishlist(user.id).await?;
    Ok(Json(wishlist))
}

pub async fn add_to_wishlist_handler(
    State(service): State<Arc<WishlistServiceImpl>>,
    Extension(user): Extension<AuthUser>,
    Path(product_id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let wishlist = service.add_product(user.id, parse_object_id(&product_id)?).await?;
    Ok(Json(wishlist))
}

pub async fn remove_from_wishlist_handler(
    State(service): State<Arc<WishlistServiceImpl>>,
    Extension(user): Extension<AuthUser>,
    Path(product_id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let wishlist = service.remove_product(user.id, parse_object_id(&product_id)?).await?;
    Ok(Json(wishlist))
}
