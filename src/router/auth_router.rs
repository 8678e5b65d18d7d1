use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

use crate::handler::auth_handler::{
    google_auth_handler, google_callback_handler, login_handler, refresh_token_handler,
    register_handler,
};
use crate::service::auth_service::AuthServiceImpl;

pub fn auth_router(service: Arc<AuthServiceImpl>) -> Router {
    Router::new()
        .route("/api/auth/register", post(register_handler))
        .route("/api/auth/login", post(login_handler))
        .route("/api/auth/refresh-token", post(refresh_token_handler))
        .route("/api/auth/google", get(google_auth_handler))
        .route("/api/auth/google/callback", get(google_callback_handler))
        .with_state(service)
}
