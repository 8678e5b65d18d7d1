use axum::routing::{delete, post};
use axum::{middleware, Router};
use std::sync::Arc;

use crate::handler::upload_handler::{delete_image_handler, upload_image_handler};
use crate::middlewares::auth_middleware::{authenticate, require_admin, AuthState};
use crate::util::image_store::ImageStoreService;

pub fn upload_router(image_store: Option<Arc<ImageStoreService>>, auth_state: Arc<AuthState>) -> Router {
    Router::new()
        .route("/api/admin/uploads", post(upload_image_handler))
        // public_id contains slashes ("images/<uuid>.<ext>")
        .route("/api/admin/uploads/*public_id", delete(delete_image_handler))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(auth_state, authenticate))
        .with_state(image_store)
}
