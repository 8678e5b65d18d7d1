use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use std::sync::Arc;

use crate::dto::product_dto::{
    AddReviewRequest, CreateProductRequest, PageQuery, ProductListQuery, UpdateProductRequest,
};
use crate::handler::{parse_object_id, validate_payload};
use crate::middlewares::auth_middleware::AuthUser;
use crate::service::catalog_service::{CatalogService, CatalogServiceImpl};
use crate::util::error::HandlerError;

pub async fn list_products_handler(
    State(service): State<Arc<CatalogServiceImpl>>,
    Query(query): Query<ProductListQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let response = service.list_products(query).await?;
    Ok(Json(response))
}

pub async fn get_product_handler(
    State(service): State<Arc<CatalogServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let product = service.get_product(parse_object_id(&id)?).await?;
    Ok(Json(product))
}

pub async fn featured_products_handler(
    State(service): State<Arc<CatalogServiceImpl>>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let products = service.featured_products(query.limit.unwrap_or(8)).await?;
    Ok(Json(products))
}

pub async fn new_arrivals_handler(
    State(service): State<Arc<CatalogServiceImpl>>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let products = service.new_arrivals(query.limit.unwrap_or(8)).await?;
    Ok(Json(products))
}

pub async fn add_review_handler(
    State(service): State<Arc<CatalogServiceImpl>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(payload): Json<AddReviewRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    validate_payload(&payload)?;
    let product = service.add_review(user.id, user.name, parse_object_id(&id)?, payload).await?;
    Ok(Json(product))
}

// --- admin surface ---

pub async fn create_product_handler(
    State(service): State<Arc<CatalogServiceImpl>>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    validate_payload(&payload)?;
    let product = service.create_product(payload).await?;
    Ok(Json(product))
}

pub async fn update_product_handler(
    State(service): State<Arc<CatalogServiceImpl>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    validate_payload(&payload)?;
    let product = service.update_product(parse_object_id(&id)?, payload).await?;
    Ok(Json(product))
}

pub async fn delete_product_handler(
    State(service): State<Arc<CatalogServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    service.delete_product(parse_object_id(&id)?).await?;
    Ok(Json(serde_json::json!({ "message": "Product deleted" })))
}

pub async fn list_all_products_handler(
    State(service): State<Arc<CatalogServiceImpl>>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let products = service
        .list_all_products(query.page.unwrap_or(1), query.limit.unwrap_or(20))
        .await?;
    Ok(Json(products))
}
