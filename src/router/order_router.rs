use axum::routing::{get, post, put};
use axum::{middleware, Router};
use std::sync::Arc;

use crate::handler::order_handler::{
    cancel_order_handler, create_order_handler, decide_return_handler, get_order_handler,
    list_all_orders_handler, list_my_orders_handler, request_return_handler,
    update_order_status_handler,
};
use crate::middlewares::auth_middleware::{authenticate, require_admin, require_verified, AuthState};
use crate::service::order_service::OrderServiceImpl;

pub fn order_router(service: Arc<OrderServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    let user = Router::new()
        .route("/api/orders", get(list_my_orders_handler).post(create_order_handler))
        .route("/api/orders/:id", get(get_order_handler))
        .route("/api/orders/:id/cancel", post(cancel_order_handler))
        .route("/api/orders/:id/return", post(request_return_handler))
        .route_layer(middleware::from_fn(require_verified))
        .route_layer(middleware::from_fn_with_state(auth_state.clone(), authenticate));

    let admin = Router::new()
        .route("/api/admin/orders", get(list_all_orders_handler))
        .route("/api/admin/orders/:id/status", put(update_order_status_handler))
        .route("/api/admin/orders/:id/return", put(decide_return_handler))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(auth_state, authenticate));

    user.merge(admin).with_state(service)
}
