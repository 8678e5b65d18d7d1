use axum::routing::{get, post};
use axum::{middleware, Router};
use std::sync::Arc;

use crate::handler::wishlist_handler::{
    add_to_wishlist_handler, get_wishlist_handler, remove_from_wishlist_handler,
};
use crate::middlewares::auth_middleware::{authenticate, AuthState};
use crate::service::wishlist_service::WishlistServiceImpl;

pub fn wishlist_router(service: Arc<WishlistServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    Router::new()
        .route("/api/wishlist", get(get_wishlist_handler))
        .route(
            "/api/wishlist/:product_id",
            post(add_to_wishlist_handler).delete(remove_from_wishlist_handler),
        )
        .route_layer(middleware::from_fn_with_state(auth_state, authenticate))
        .with_state(service)
}
