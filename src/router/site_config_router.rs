use axum::routing::{get, post, put};
use axum::{middleware, Router};
use std::sync::Arc;

use crate::handler::site_config_handler::{
    create_notification_handler, delete_notification_handler, get_footer_handler,
    get_home_page_handler, get_home_page_settings_handler, get_store_settings_handler,
    get_website_config_handler, list_notifications_handler, update_footer_handler,
    update_home_page_handler, update_notification_handler, update_store_settings_handler,
    update_website_config_handler,
};
use crate::middlewares::auth_middleware::{authenticate, require_admin, AuthState};
use crate::service::site_config_service::SiteConfigServiceImpl;

pub fn site_config_router(service: Arc<SiteConfigServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    let public = Router::new()
        .route("/api/site/settings", get(get_store_settings_handler))
        .route("/api/site/footer", get(get_footer_handler))
        .route("/api/site/config", get(get_website_config_handler))
        .route("/api/site/home", get(get_home_page_handler))
        .route("/api/site/notifications", get(list_notifications_handler));

    let admin = Router::new()
        .route("/api/admin/site/settings", put(update_store_settings_handler))
        .route("/api/admin/site/footer", put(update_footer_handler))
        .route("/api/admin/site/config", put(update_website_config_handler))
        .route(
            "/api/admin/site/home",
            get(get_home_page_settings_handler).put(update_home_page_handler),
        )
        .route("/api/admin/site/notifications", post(create_notification_handler))
        .route(
            "/api/admin/site/notifications/:id",
            put(update_notification_handler).delete(delete_notification_handler),
        )
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(auth_state, authenticate));

    public.merge(admin).with_state(service)
}
