use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use std::sync::Arc;

use crate::dto::product_dto::{BrandRequest, CategoryRequest};
use crate::handler::{parse_object_id, validate_payload};
use crate::service::catalog_service::{CatalogService, CatalogServiceImpl};
use crate::util::error::HandlerError;

pub async fn list_categories_handler(
    State(service): State<Arc<CatalogServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let categories = service.list_categories().await?;
    Ok(Json(categories))
}

pub async fn create_category_handler(
    State(service): State<Arc<CatalogServiceImpl>>,
    Json(payload): Json<CategoryRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    validate_payload(&payload)?;
    let category = service.create_category(payload).await?;
    Ok(Json(category))
}

pub async fn update_category_handler(
    State(service): State<Arc<CatalogServiceImpl>>,
    Path(id): Path<String>,
    Json(payload): Json<CategoryRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    validate_payload(&payload)?;
    let category = service.update_category(parse_object_id(&id)?, payload).await?;
    Ok(Json(category))
}

pub async fn delete_category_handler(
    State(service): State<Arc<CatalogServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    service.delete_category(parse_object_id(&id)?).await?;
    Ok(Json(serde_json::json!({ "message": "Category deleted" })))
}

pub async fn list_brands_handler(
    State(service): State<Arc<CatalogServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let brands = service.list_brands().await?;
    Ok(Json(brands))
}

pub async fn create_brand_handler(
    State(service): State<Arc<CatalogServiceImpl>>,
    Json(payload): Json<BrandRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    validate_payload(&payload)?;
    let brand = service.create_brand(payload).await?;
    Ok(Json(brand))
}

pub async fn update_brand_handler(
    State(service): State<Arc<CatalogServiceImpl>>,
    Path(id): Path<String>,
    Json(payload): Json<BrandRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    validate_payload(&payload)?;
    let brand = service.update_brand(parse_object_id(&id)?, payload).await?;
    Ok(Json(brand))
}

pub async fn delete_brand_handler(
    State(service): State<Arc<CatalogServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    service.delete_brand(parse_object_id(&id)?).await?;
    Ok(Json(serde_json::json!({ "message": "Brand deleted" })))
}
