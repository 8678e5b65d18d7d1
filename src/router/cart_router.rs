use axum::routing::{get, post};
use axum::{middleware, Router};
use std::sync::Arc;

use crate::handler::cart_handler::{
    add_item_handler, clear_cart_handler, get_cart_handler, remove_item_handler,
    update_item_handler,
};
use crate::middlewares::auth_middleware::{authenticate, require_verified, AuthState};
use crate::service::cart_service::CartServiceImpl;

pub fn cart_router(service: Arc<CartServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    Router::new()
        .route("/api/cart", get(get_cart_handler).delete(clear_cart_handler))
        .route("/api/cart/items", post(add_item_handler).put(update_item_handler))
        .route("/api/cart/items/remove", post(remove_item_handler))
        .route_layer(middleware::from_fn(require_verified))
        .route_layer(middleware::from_fn_with_state(auth_state, authenticate))
        .with_state(service)
}
