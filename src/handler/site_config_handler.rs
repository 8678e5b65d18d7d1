use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

use crate::dto::site_config_dto::{
    HomePageResponse, NotificationRequest, UpdateFooterRequest, UpdateHomePageRequest,
    UpdateStoreSettingsRequest, UpdateWebsiteConfigRequest,
};
use crate::handler::{parse_object_id, validate_payload};
use crate::service::site_config_service::{SiteConfigService, SiteConfigServiceImpl};
use crate::util::error::HandlerError;

pub async fn get_store_settings_handler(
    State(service): State<Arc<SiteConfigServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let settings = service.get_store_settings().await?;
    Ok(Json(settings))
}

pub async fn update_store_settings_handler(
    State(service): State<Arc<SiteConfigServiceImpl>>,
    Json(payload): Json<UpdateStoreSettingsRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    validate_payload(&payload)?;
    let settings = service.update_store_settings(payload).await?;
    Ok(Json(settings))
}

pub async fn get_footer_handler(
    State(service): State<Arc<SiteConfigServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let footer = service.get_footer().await?;
    Ok(Json(footer))
}

pub async fn update_footer_handler(
    State(service): State<Arc<SiteConfigServiceImpl>>,
    Json(payload): Json<UpdateFooterRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let footer = service.update_footer(payload).await?;
    Ok(Json(footer))
}

pub async fn get_website_config_handler(
    State(service): State<Arc<SiteConfigServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let config = service.get_website_config().await?;
    Ok(Json(config))
}

pub async fn update_website_config_handler(
    State(service): State<Arc<SiteConfigServiceImpl>>,
    Json(payload): Json<UpdateWebsiteConfigRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    validate_payload(&payload)?;
    let config = service.update_website_config(payload).await?;
    Ok(Json(config))
}

/// Public: the ordered section tags the storefront should render.
pub async fn get_home_page_handler(
    State(service): State<Arc<SiteConfigServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let sections = service.resolve_home_page().await?;
    Ok(Json(HomePageResponse { sections }))
}

/// Admin: the raw, editable layout including hidden sections.
pub async fn get_home_page_settings_handler(
    State(service): State<Arc<SiteConfigServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let settings = service.get_home_page_settings().await?;
    Ok(Json(settings))
}

pub async fn update_home_page_handler(
    State(service): State<Arc<SiteConfigServiceImpl>>,
    Json(payload): Json<UpdateHomePageRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let settings = service.update_home_page_settings(payload).await?;
    Ok(Json(settings))
}

#[derive(Debug, Deserialize)]
pub struct NotificationListQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

pub async fn list_notifications_handler(
    State(service): State<Arc<SiteConfigServiceImpl>>,
    Query(query): Query<NotificationListQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let notifications = service.list_notifications(!query.include_inactive).await?;
    Ok(Json(notifications))
}

pub async fn create_notification_handler(
    State(service): State<Arc<SiteConfigServiceImpl>>,
    Json(payload): Json<NotificationRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    validate_payload(&payload)?;
    let notification = service.create_notification(payload).await?;
    Ok(Json(notification))
}

pub async fn update_notification_handler(
    State(service): State<Arc<SiteConfigServiceImpl>>,
    Path(id): Path<String>,
    Json(payload): Json<NotificationRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    validate_payload(&payload)?;
    let notification = service.update_notification(parse_object_id(&id)?, payload).await?;
    Ok(Json(notification))
}

pub async fn delete_notification_handler(
    State(service): State<Arc<SiteConfigServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    service.delete_notification(parse_object_id(&id)?).await?;
    Ok(Json(serde_json::json!({ "message": "Notification deleted" })))
}
