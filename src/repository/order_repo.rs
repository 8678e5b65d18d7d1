use crate::model::order::Order;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::repository::MongoStore;
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::StreamExt;
use tracing::{error, info};

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create(&self, order: Order) -> RepositoryResult<Order>;
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Order>;
    /// Full-document rewrite used by the lifecycle transitions.
    async fn save(&self, order: Order) -> RepositoryResult<Order>;
    async fn list_for_user(&self, user_id: ObjectId) -> RepositoryResult<Vec<Order>>;
    async fn list_all(&self, page: u64, limit: i64) -> RepositoryResult<(Vec<Order>, u64)>;
}

pub struct MongoOrderRepository {
    collection: mongodb::Collection<Order>,
}

impl MongoOrderRepository {
    pub fn new(store: &MongoStore) -> Self {
        MongoOrderRepository { collection: store.database().collection::<Order>("orders") }
    }
}

#[async_trait]
impl OrderRepository for MongoOrderRepository {
    async fn create(&self, order: Order) -> RepositoryResult<Order> {
        let mut new_order = order;
        new_order.id = Some(ObjectId::new());
        let now = chrono::Utc::now().to_rfc3339();
        new_order.created_at = Some(now.clone());
        new_order.updated_at = Some(now);

        match self.collection.insert_one(new_order.clone(), None).await {
            Ok(_) => {
                info!(order_number = %new_order.order_number, "Order created");
                Ok(new_order)
            }
            Err(e) => {
                error!("Failed to create order: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Order> {
        let order = self
            .collection
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to fetch order: {}", e)))?;
        order.ok_or_else(|| RepositoryError::not_found(format!("Order not found for ID: {}", id)))
    }

    async fn save(&self, mut order: Order) -> RepositoryResult<Order> {
        let id = order
            .id
            .ok_or_else(|| RepositoryError::validation("Order has no id".to_string()))?;
        order.updated_at = Some(chrono::Utc::now().to_rfc3339());
        let mut document = bson::to_document(&order)?;
        document.remove("_id");
        match self.collection.update_one(doc! { "_id": id }, doc! { "$set": document }, None).await {
            Ok(result) if result.matched_count > 0 => Ok(order),
            Ok(_) => Err(RepositoryError::not_found(format!("No order found for ID: {}", id))),
            Err(e) => {
                error!("Failed to save order: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    async fn list_for_user(&self, user_id: ObjectId) -> RepositoryResult<Vec<Order>> {
        let options = mongodb::options::FindOptions::builder().sort(doc! { "created_at": -1 }).build();
        let mut cursor = self
            .collection
            .find(doc! { "user_id": user_id }, options)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to list orders: {}", e)))?;

        let mut orders = Vec::new();
        while let Some(result) = cursor.next().await {
            orders.push(result.map_err(|e| {
                RepositoryError::serialization(format!("Failed to deserialize order: {}", e))
            })?);
        }
        Ok(orders)
    }

    async fn list_all(&self, page: u64, limit: i64) -> RepositoryResult<(Vec<Order>, u64)> {
        let total = self
            .collection
            .count_documents(None, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to count orders: {}", e)))?;

        let skip = page.saturating_sub(1) * limit.max(0) as u64;
        let options = mongodb::options::FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .skip(skip)
            .limit(limit)
            .build();
        let mut cursor = self
            .collection
            .find(None, options)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to list orders: {}", e)))?;

        let mut orders = Vec::new();
        while let Some(result) = cursor.next().await {
            orders.push(result.map_err(|e| {
                RepositoryError::serialization(format!("Failed to deserialize order: {}", e))
            })?);
        }
        Ok((orders, total))
    }
}
