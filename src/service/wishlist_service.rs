use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{info, instrument};

use crate::model::wishlist::Wishlist;
use crate::repository::product_repo::{MongoProductRepository, ProductRepository};
use crate::repository::wishlist_repo::{MongoWishlistRepository, WishlistRepository};
use crate::util::error::ServiceError;

#[async_trait]
pub trait WishlistService: Send + Sync {
    async fn get_wishlist(&self, user_id: ObjectId) -> Result<Wishlist, ServiceError>;
    async fn add_product(&self, user_id: ObjectId, product_id: ObjectId) -> Result<Wishlist, ServiceError>;
    async fn remove_product(&self, user_id: ObjectId, product_id: ObjectId) -> Result<Wishlist, ServiceError>;
}

pub struct WishlistServiceImpl {
    pub wishlist_repo: Arc<MongoWishlistRepository>,
    pub product_repo: Arc<MongoProductRepository>,
}

impl WishlistServiceImpl {
    pub fn new(wishlist_repo: Arc<MongoWishlistRepository>, product_repo: Arc<MongoProductRepository>) -> Self {
        Self { wishlist_repo, product_repo }
    }
}

#[async_trait]
impl WishlistService for WishlistServiceImpl {
    async fn get_wishlist(&self, user_id: ObjectId) -> Result<Wishlist, ServiceError> {
        Ok(self.wishlist_repo.get_or_create(user_id).await?)
    }

    #[instrument(skip(self), fields(user_id = %user_id, product_id = %product_id))]
    async fn add_product(&self, user_id: ObjectId, product_id: ObjectId) -> Result<Wishlist, ServiceError> {
        // Only existing products can be wished for; availability is not
        // required (an out-of-stock product is a fine wish).
        self.product_repo
            .find_by_id(&product_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Product not found".to_string()))?;

        let mut wishlist = self.wishlist_repo.get_or_create(user_id).await?;
        if !wishlist.add(product_id) {
            return Err(ServiceError::Conflict("Product is already in your wishlist".to_string()));
        }
        let wishlist = self.wishlist_repo.save(wishlist).await?;
        info!("Product added to wishlist");
        Ok(wishlist)
    }

    async fn remove_product(&self, user_id: ObjectId, product_id: ObjectId) -> Result<Wishlist, ServiceError> {
        let mut wishlist = self.wishlist_repo.get_or_create(user_id).await?;
        wishlist.remove(&product_id);
        Ok(self.wishlist_repo.save(wishlist).await?)
    }
}
