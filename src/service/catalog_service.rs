use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{error, info, instrument, warn};

use crate::dto::product_dto::{
    AddReviewRequest, BrandRequest, CategoryRequest, CreateProductRequest, ProductListQuery,
    ProductListResponse, UpdateProductRequest,
};
use crate::model::brand::Brand;
use crate::model::category::{slugify, Category};
use crate::model::product::{Product, Review};
use crate::repository::brand_repo::{BrandRepository, MongoBrandRepository};
use crate::repository::cart_repo::{CartRepository, MongoCartRepository};
use crate::repository::category_repo::{CategoryRepository, MongoCategoryRepository};
use crate::repository::product_repo::{
    MongoProductRepository, ProductQuery, ProductRepository, ProductSort,
};
use crate::repository::wishlist_repo::{MongoWishlistRepository, WishlistRepository};
use crate::util::error::ServiceError;
use crate::util::image_store::ImageStoreService;

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

#[async_trait]
pub trait CatalogService: Send + Sync {
    // public catalog
    async fn list_products(&self, query: ProductListQuery) -> Result<ProductListResponse, ServiceError>;
    async fn get_product(&self, id: ObjectId) -> Result<Product, ServiceError>;
    async fn featured_products(&self, limit: i64) -> Result<Vec<Product>, ServiceError>;
    async fn new_arrivals(&self, limit: i64) -> Result<Vec<Product>, ServiceError>;
    async fn add_review(
        &self,
        user_id: ObjectId,
        user_name: String,
        product_id: ObjectId,
        request: AddReviewRequest,
    ) -> Result<Product, ServiceError>;

    // admin: products
    async fn create_product(&self, request: CreateProductRequest) -> Result<Product, ServiceError>;
    async fn update_product(
        &self,
        id: ObjectId,
        request: UpdateProductRequest,
    ) -> Result<Product, ServiceError>;
    async fn delete_product(&self, id: ObjectId) -> Result<(), ServiceError>;
    async fn list_all_products(&self, page: u64, limit: i64) -> Result<Vec<Product>, ServiceError>;

    // admin: categories
    async fn list_categories(&self) -> Result<Vec<Category>, ServiceError>;
    async fn create_category(&self, request: CategoryRequest) -> Result<Category, ServiceError>;
    async fn update_category(&self, id: ObjectId, request: CategoryRequest) -> Result<Category, ServiceError>;
    async fn delete_category(&self, id: ObjectId) -> Result<(), ServiceError>;

    // admin: brands
    async fn list_brands(&self) -> Result<Vec<Brand>, ServiceError>;
    async fn create_brand(&self, request: BrandRequest) -> Result<Brand, ServiceError>;
    async fn update_brand(&self, id: ObjectId, request: BrandRequest) -> Result<Brand, ServiceError>;
    async fn delete_brand(&self, id: ObjectId) -> Result<(), ServiceError>;
}

pub struct CatalogServiceImpl {
    pub product_repo: Arc<MongoProductRepository>,
    pub category_repo: Arc<MongoCategoryRepository>,
    pub brand_repo: Arc<MongoBrandRepository>,
    pub cart_repo: Arc<MongoCartRepository>,
    pub wishlist_repo: Arc<MongoWishlistRepository>,
    pub image_store: Option<Arc<ImageStoreService>>,
}

impl CatalogServiceImpl {
    pub fn new(
        product_repo: Arc<MongoProductRepository>,
        category_repo: Arc<MongoCategoryRepository>,
        brand_repo: Arc<MongoBrandRepository>,
        cart_repo: Arc<MongoCartRepository>,
        wishlist_repo: Arc<MongoWishlistRepository>,
        image_store: Option<Arc<ImageStoreService>>,
    ) -> Self {
        Self { product_repo, category_repo, brand_repo, cart_repo, wishlist_repo, image_store }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn list_products(&self, query: ProductListQuery) -> Result<ProductListResponse, ServiceError> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);

        let sort = match query.sort.as_deref() {
            None => None,
            Some(key) => Some(ProductSort::parse(key).ok_or_else(|| {
                ServiceError::InvalidInput(format!("Unknown sort key '{}'", key))
            })?),
        };

        let repo_query = ProductQuery {
            search: query.search.filter(|s| !s.trim().is_empty()),
            category: query.category,
            brand: query.brand,
            min_price: query.min_price,
            max_price: query.max_price,
            sort,
            page,
            limit,
        };

        let (products, total) = self.product_repo.list_public(&repo_query).await?;
        let total_pages = if total == 0 { 0 } else { (total + limit as u64 - 1) / limit as u64 };
        Ok(ProductListResponse { products, total, page, limit, total_pages })
    }

    async fn get_product(&self, id: ObjectId) -> Result<Product, ServiceError> {
        Ok(self.product_repo.get_by_id(id).await?)
    }

    async fn featured_products(&self, limit: i64) -> Result<Vec<Product>, ServiceError> {
        Ok(self.product_repo.list_flagged("is_featured", limit.clamp(1, MAX_PAGE_SIZE)).await?)
    }

    async fn new_arrivals(&self, limit: i64) -> Result<Vec<Product>, ServiceError> {
        Ok(self.product_repo.list_flagged("is_new", limit.clamp(1, MAX_PAGE_SIZE)).await?)
    }

    #[instrument(skip(self, request), fields(product_id = %product_id, user_id = %user_id))]
    async fn add_review(
        &self,
        user_id: ObjectId,
        user_name: String,
        product_id: ObjectId,
        request: AddReviewRequest,
    ) -> Result<Product, ServiceError> {
        let product = self.product_repo.get_by_id(product_id).await?;
        if product.reviews.iter().any(|r| r.user_id == user_id) {
            return Err(ServiceError::Conflict("You have already reviewed this product".to_string()));
        }

        let review = Review {
            user_id,
            name: user_name,
            rating: request.rating,
            comment: request.comment,
            created_at: Some(chrono::Utc::now().to_rfc3339()),
        };
        let updated = self.product_repo.push_review(product_id, review).await?;
        info!("Review added");
        Ok(updated)
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    async fn create_product(&self, request: CreateProductRequest) -> Result<Product, ServiceError> {
        let product = Product {
            id: None,
            name: request.name,
            description: request.description,
            price: request.price,
            original_price: request.original_price,
            category: request.category,
            brand: request.brand,
            images: request.images,
            colors: request.colors,
            sizes: request.sizes,
            quantity: request.quantity,
            is_new: request.is_new,
            is_featured: request.is_featured,
            is_sold: false,
            is_active: true,
            rating: 0.0,
            num_reviews: 0,
            reviews: Vec::new(),
            sku: String::new(),
            tags: request.tags,
            created_at: None,
            updated_at: None,
        };
        Ok(self.product_repo.create(product).await?)
    }

    #[instrument(skip(self, request), fields(product_id = %id))]
    async fn update_product(
        &self,
        id: ObjectId,
        request: UpdateProductRequest,
    ) -> Result<Product, ServiceError> {
        let mut product = self.product_repo.get_by_id(id).await?;

        if let Some(name) = request.name {
            product.name = name;
        }
        if let Some(description) = request.description {
            product.description = description;
        }
        if let Some(price) = request.price {
            product.price = price;
        }
        if request.original_price.is_some() {
            product.original_price = request.original_price;
        }
        if let Some(category) = request.category {
            product.category = category;
        }
        if let Some(brand) = request.brand {
            product.brand = brand;
        }
        if let Some(images) = request.images {
            product.images = images;
        }
        if let Some(colors) = request.colors {
            product.colors = colors;
        }
        if let Some(sizes) = request.sizes {
            product.sizes = sizes;
        }
        if let Some(quantity) = request.quantity {
            product.quantity = quantity;
        }
        if let Some(is_new) = request.is_new {
            product.is_new = is_new;
        }
        if let Some(is_featured) = request.is_featured {
            product.is_featured = is_featured;
        }
        if let Some(is_sold) = request.is_sold {
            product.is_sold = is_sold;
        }
        if let Some(is_active) = request.is_active {
            product.is_active = is_active;
        }
        if let Some(tags) = request.tags {
            product.tags = tags;
        }

        Ok(self.product_repo.update(id, product).await?)
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn delete_product(&self, id: ObjectId) -> Result<(), ServiceError> {
        let product = self.product_repo.get_by_id(id).await?;
        self.product_repo.delete(id).await?;

        // Reference cleanup; the product is already gone, so these only log.
        match self.cart_repo.pull_product_from_all(id).await {
            Ok(count) if count > 0 => info!(count, "Removed deleted product from carts"),
            Ok(_) => {}
            Err(e) => error!("Cart cleanup after product delete failed: {}", e),
        }
        match self.wishlist_repo.pull_product_from_all(id).await {
            Ok(count) if count > 0 => info!(count, "Removed deleted product from wishlists"),
            Ok(_) => {}
            Err(e) => error!("Wishlist cleanup after product delete failed: {}", e),
        }

        // Best-effort image deletion: a dangling object is acceptable, a
        // product that cannot be deleted is not.
        if let Some(ref image_store) = self.image_store {
            for image in &product.images {
                if let Err(e) = image_store.remove_image(&image.public_id).await {
                    warn!(public_id = %image.public_id, "Failed to delete stored image: {}", e);
                }
            }
        }

        info!("Product deleted");
        Ok(())
    }

    async fn list_all_products(&self, page: u64, limit: i64) -> Result<Vec<Product>, ServiceError> {
        Ok(self.product_repo.list_all(page.max(1), limit.clamp(1, MAX_PAGE_SIZE)).await?)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ServiceError> {
        Ok(self.category_repo.list().await?)
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    async fn create_category(&self, request: CategoryRequest) -> Result<Category, ServiceError> {
        if self.category_repo.find_by_name_ci(&request.name).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "A category named '{}' already exists",
                request.name
            )));
        }
        let category = Category {
            id: None,
            slug: slugify(&request.name),
            name: request.name,
            description: request.description,
            image: request.image,
            created_at: None,
            updated_at: None,
        };
        Ok(self.category_repo.create(category).await?)
    }

    #[instrument(skip(self, request), fields(category_id = %id))]
    async fn update_category(&self, id: ObjectId, request: CategoryRequest) -> Result<Category, ServiceError> {
        let mut category = self.category_repo.get_by_id(id).await?;
        let renamed = !category.name.eq_ignore_ascii_case(&request.name);

        if renamed {
            if let Some(existing) = self.category_repo.find_by_name_ci(&request.name).await? {
                if existing.id != Some(id) {
                    return Err(ServiceError::Conflict(format!(
                        "A category named '{}' already exists",
                        request.name
                    )));
                }
            }
        }

        let old_name = category.name.clone();
        category.name = request.name;
        category.slug = slugify(&category.name);
        category.description = request.description;
        category.image = request.image;
        let updated = self.category_repo.update(id, category).await?;

        if renamed {
            // Products carry the category as free text; rewrite them all.
            self.product_repo.rename_category(&old_name, &updated.name).await?;
        }
        Ok(updated)
    }

    #[instrument(skip(self), fields(category_id = %id))]
    async fn delete_category(&self, id: ObjectId) -> Result<(), ServiceError> {
        let category = self.category_repo.get_by_id(id).await?;
        let referencing = self.product_repo.count_by_category(&category.name).await?;
        if referencing > 0 {
            return Err(ServiceError::Conflict(format!(
                "Cannot delete category '{}': {} product(s) still reference it",
                category.name, referencing
            )));
        }
        self.category_repo.delete(id).await?;
        info!("Category deleted");
        Ok(())
    }

    async fn list_brands(&self) -> Result<Vec<Brand>, ServiceError> {
        Ok(self.brand_repo.list().await?)
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    async fn create_brand(&self, request: BrandRequest) -> Result<Brand, ServiceError> {
        if self.brand_repo.find_by_name_ci(&request.name).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "A brand named '{}' already exists",
                request.name
            )));
        }
        let brand = Brand {
            id: None,
            slug: slugify(&request.name),
            name: request.name,
            description: request.description,
            logo: request.logo,
            created_at: None,
            updated_at: None,
        };
        Ok(self.brand_repo.create(brand).await?)
    }

    #[instrument(skip(self, request), fields(brand_id = %id))]
    async fn update_brand(&self, id: ObjectId, request: BrandRequest) -> Result<Brand, ServiceError> {
        let mut brand = self.brand_repo.get_by_id(id).await?;
        let renamed = !brand.name.eq_ignore_ascii_case(&request.name);

        if renamed {
            if let Some(existing) = self.brand_repo.find_by_name_ci(&request.name).await? {
                if existing.id != Some(id) {
                    return Err(ServiceError::Conflict(format!(
                        "A brand named '{}' already exists",
                        request.name
                    )));
                }
            }
        }

        let old_name = brand.name.clone();
        brand.name = request.name;
        brand.slug = slugify(&brand.name);
        brand.description = request.description;
        brand.logo = request.logo;
        let updated = self.brand_repo.update(id, brand).await?;

        if renamed {
            self.product_repo.rename_brand(&old_name, &updated.name).await?;
        }
        Ok(updated)
    }

    #[instrument(skip(self), fields(brand_id = %id))]
    async fn delete_brand(&self, id: ObjectId) -> Result<(), ServiceError> {
        let brand = self.brand_repo.get_by_id(id).await?;
        let referencing = self.product_repo.count_by_brand(&brand.name).await?;
        if referencing > 0 {
            return Err(ServiceError::Conflict(format!(
                "Cannot delete brand '{}': {} product(s) still reference it",
                brand.name, referencing
            )));
        }
        self.brand_repo.delete(id).await?;
        info!("Brand deleted");
        Ok(())
    }
}
