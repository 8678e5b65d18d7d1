use axum::routing::{delete, get, put};
use axum::{middleware, Router};
use std::sync::Arc;

use crate::handler::user_handler::{
    change_password_handler, delete_user_handler, get_profile_handler, list_users_handler,
    set_role_handler, set_verified_handler, update_profile_handler,
};
use crate::middlewares::auth_middleware::{authenticate, require_superadmin, AuthState};
use crate::service::user_service::UserServiceImpl;

pub fn user_router(service: Arc<UserServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    let profile = Router::new()
        .route("/api/users/me", get(get_profile_handler).put(update_profile_handler))
        .route("/api/users/me/password", put(change_password_handler))
        .route_layer(middleware::from_fn_with_state(auth_state.clone(), authenticate));

    let superadmin = Router::new()
        .route("/api/admin/users", get(list_users_handler))
        .route("/api/admin/users/:id/role", put(set_role_handler))
        .route("/api/admin/users/:id/verify", put(set_verified_handler))
        .route("/api/admin/users/:id", delete(delete_user_handler))
        .route_layer(middleware::from_fn(require_superadmin))
        .route_layer(middleware::from_fn_with_state(auth_state, authenticate));

    profile.merge(superadmin).with_state(service)
}
