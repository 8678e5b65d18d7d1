use axum::routing::{get, post};
use axum::{middleware, Router};
use std::sync::Arc;

use crate::handler::product_handler::{
    add_review_handler, create_product_handler, delete_product_handler, featured_products_handler,
    get_product_handler, list_all_products_handler, list_products_handler, new_arrivals_handler,
    update_product_handler,
};
use crate::middlewares::auth_middleware::{authenticate, require_admin, require_verified, AuthState};
use crate::service::catalog_service::CatalogServiceImpl;

pub fn product_router(service: Arc<CatalogServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    // Fixed segments before the `:id` catch-all
    let public = Router::new()
        .route("/api/products", get(list_products_handler))
        .route("/api/products/featured", get(featured_products_handler))
        .route("/api/products/new-arrivals", get(new_arrivals_handler))
        .route("/api/products/:id", get(get_product_handler));

    let reviews = Router::new()
        .route("/api/products/:id/reviews", post(add_review_handler))
        .route_layer(middleware::from_fn(require_verified))
        .route_layer(middleware::from_fn_with_state(auth_state.clone(), authenticate));

    let admin = Router::new()
        .route("/api/admin/products", get(list_all_products_handler).post(create_product_handler))
        .route(
            "/api/admin/products/:id",
            axum::routing::put(update_product_handler).delete(delete_product_handler),
        )
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(auth_state, authenticate));

    public.merge(reviews).merge(admin).with_state(service)
}
