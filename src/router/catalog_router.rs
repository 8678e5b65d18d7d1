use axum::routing::{get, post, put};
use axum::{middleware, Router};
use std::sync::Arc;

use crate::handler::catalog_handler::{
    create_brand_handler, create_category_handler, delete_brand_handler, delete_category_handler,
    list_brands_handler, list_categories_handler, update_brand_handler, update_category_handler,
};
use crate::middlewares::auth_middleware::{authenticate, require_admin, AuthState};
use crate::service::catalog_service::CatalogServiceImpl;

pub fn catalog_router(service: Arc<CatalogServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    let public = Router::new()
        .route("/api/categories", get(list_categories_handler))
        .route("/api/brands", get(list_brands_handler));

    let admin = Router::new()
        .route("/api/admin/categories", post(create_category_handler))
        .route(
            "/api/admin/categories/:id",
            put(update_category_handler).delete(delete_category_handler),
        )
        .route("/api/admin/brands", post(create_brand_handler))
        .route("/api/admin/brands/:id", put(update_brand_handler).delete(delete_brand_handler))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(auth_state, authenticate));

    public.merge(admin).with_state(service)
}
