use crate::model::cart::Cart;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::repository::MongoStore;
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use tracing::error;

#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Fetches the user's cart, creating an empty one on first access.
    async fn get_or_create(&self, user_id: ObjectId) -> RepositoryResult<Cart>;
    async fn save(&self, cart: Cart) -> RepositoryResult<Cart>;
    /// Removes a product from every cart that references it (product
    /// deletion cascade).
    async fn pull_product_from_all(&self, product_id: ObjectId) -> RepositoryResult<u64>;
}

pub struct MongoCartRepository {
    collection: mongodb::Collection<Cart>,
}

impl MongoCartRepository {
    pub fn new(store: &MongoStore) -> Self {
        MongoCartRepository { collection: store.database().collection::<Cart>("carts") }
    }
}

#[async_trait]
impl CartRepository for MongoCartRepository {
    async fn get_or_create(&self, user_id: ObjectId) -> RepositoryResult<Cart> {
        let existing = self
            .collection
            .find_one(doc! { "user_id": user_id }, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to fetch cart: {}", e)))?;

        if let Some(cart) = existing {
            return Ok(cart);
        }

        let mut cart = Cart::empty(user_id);
        cart.id = Some(ObjectId::new());
        let now = chrono::Utc::now().to_rfc3339();
        cart.created_at = Some(now.clone());
        cart.updated_at = Some(now);

        self.collection
            .insert_one(cart.clone(), None)
            .await
            .map_err(|e| {
                error!("Failed to create cart: {}", e);
                RepositoryError::from(e)
            })?;
        Ok(cart)
    }

    async fn save(&self, mut cart: Cart) -> RepositoryResult<Cart> {
        let id = cart
            .id
            .ok_or_else(|| RepositoryError::validation("Cart has no id".to_string()))?;
        cart.updated_at = Some(chrono::Utc::now().to_rfc3339());
        let mut document = bson::to_document(&cart)?;
        document.remove("_id");
        match self.collection.update_one(doc! { "_id": id }, doc! { "$set": document }, None).await {
            Ok(result) if result.matched_count > 0 => Ok(cart),
            Ok(_) => Err(RepositoryError::not_found(format!("No cart found for ID: {}", id))),
            Err(e) => {
                error!("Failed to save cart: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    async fn pull_product_from_all(&self, product_id: ObjectId) -> RepositoryResult<u64> {
        let update = doc! { "$pull": { "items": { "product_id": product_id } } };
        let result = self
            .collection
            .update_many(doc! {}, update, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to pull product from carts: {}", e)))?;
        Ok(result.modified_count)
    }
}
