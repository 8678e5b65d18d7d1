use axum::routing::post;
use axum::{middleware, Router};
use std::sync::Arc;

use crate::handler::payment_handler::{
    confirm_payment_handler, create_intent_handler, verify_redirect_payment_handler,
};
use crate::middlewares::auth_middleware::{authenticate, require_verified, AuthState};
use crate::service::payment_service::PaymentServiceImpl;

pub fn payment_router(service: Arc<PaymentServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    Router::new()
        .route("/api/payments/intent", post(create_intent_handler))
        .route("/api/payments/confirm", post(confirm_payment_handler))
        .route("/api/payments/verify", post(verify_redirect_payment_handler))
        .route_layer(middleware::from_fn(require_verified))
        .route_layer(middleware::from_fn_with_state(auth_state, authenticate))
        .with_state(service)
}
