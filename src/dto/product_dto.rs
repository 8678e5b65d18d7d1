use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::product::{Product, ProductImage};

/// Query string accepted by the public catalog listing.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProductListQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub total: u64,
    pub page: u64,
    pub limit: i64,
    pub total_pages: u64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,
    #[validate(length(max = 5000, message = "Description too long"))]
    pub description: String,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,
    pub original_price: Option<f64>,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    #[validate(length(min = 1, message = "Brand is required"))]
    pub brand: String,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: i64,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial update: absent fields keep their stored value.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 200, message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: Option<f64>,
    pub original_price: Option<f64>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub images: Option<Vec<ProductImage>>,
    pub colors: Option<Vec<String>>,
    pub sizes: Option<Vec<String>>,
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: Option<i64>,
    pub is_new: Option<bool>,
    pub is_featured: Option<bool>,
    pub is_sold: Option<bool>,
    pub is_active: Option<bool>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddReviewRequest {
    #[validate(range(min = 1.0, max = 5.0, message = "Rating must be between 1 and 5"))]
    pub rating: f64,
    #[validate(length(min = 1, max = 2000, message = "Comment is required"))]
    pub comment: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub image: Option<ProductImage>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BrandRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub logo: Option<ProductImage>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub limit: Option<i64>,
}
