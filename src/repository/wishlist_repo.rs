use crate::model::wishlist::Wishlist;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::repository::MongoStore;
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use tracing::error;

#[async_trait]
pub trait WishlistRepository: Send + Sync {
    async fn get_or_create(&self, user_id: ObjectId) -> RepositoryResult<Wishlist>;
    async fn save(&self, wishlist: Wishlist) -> RepositoryResult<Wishlist>;
    /// Removes a product from every wishlist that references it.
    async fn pull_product_from_all(&self, product_id: ObjectId) -> RepositoryResult<u64>;
}

pub struct MongoWishlistRepository {
    collection: mongodb::Collection<Wishlist>,
}

impl MongoWishlistRepository {
    pub fn new(store: &MongoStore) -> Self {
        MongoWishlistRepository { collection: store.database().collection::<Wishlist>("wishlists") }
    }
}

#[async_trait]
impl WishlistRepository for MongoWishlistRepository {
    async fn get_or_create(&self, user_id: ObjectId) -> RepositoryResult<Wishlist> {
        let existing = self
            .collection
            .find_one(doc! { "user_id": user_id }, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to fetch wishlist: {}", e)))?;

        if let Some(wishlist) = existing {
            return Ok(wishlist);
        }

        let mut wishlist = Wishlist::empty(user_id);
        wishlist.id = Some(ObjectId::new());
        let now = chrono::Utc::now().to_rfc3339();
        wishlist.created_at = Some(now.clone());
        wishlist.updated_at = Some(now);

        self.collection
            .insert_one(wishlist.clone(), None)
            .await
            .map_err(|e| {
                error!("Failed to create wishlist: {}", e);
                RepositoryError::from(e)
            })?;
        Ok(wishlist)
    }

    async fn save(&self, mut wishlist: Wishlist) -> RepositoryResult<Wishlist> {
        let id = wishlist
            .id
            .ok_or_else(|| RepositoryError::validation("Wishlist has no id".to_string()))?;
        wishlist.updated_at = Some(chrono::Utc::now().to_rfc3339());
        let mut document = bson::to_document(&wishlist)?;
        document.remove("_id");
        match self.collection.update_one(doc! { "_id": id }, doc! { "$set": document }, None).await {
            Ok(result) if result.matched_count > 0 => Ok(wishlist),
            Ok(_) => Err(RepositoryError::not_found(format!("No wishlist found for ID: {}", id))),
            Err(e) => Err(RepositoryError::from(e)),
        }
    }

    async fn pull_product_from_all(&self, product_id: ObjectId) -> RepositoryResult<u64> {
        let update = doc! { "$pull": { "product_ids": product_id } };
        let result = self
            .collection
            .update_many(doc! {}, update, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to pull product from wishlists: {}", e)))?;
        Ok(result.modified_count)
    }
}
