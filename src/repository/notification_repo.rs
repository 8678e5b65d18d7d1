use crate::model::notification::Notification;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::repository::MongoStore;
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::StreamExt;
use tracing::error;

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, notification: Notification) -> RepositoryResult<Notification>;
    async fn update(&self, id: ObjectId, notification: Notification) -> RepositoryResult<Notification>;
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()>;
    async fn list(&self, only_active: bool) -> RepositoryResult<Vec<Notification>>;
}

pub struct MongoNotificationRepository {
    collection: mongodb::Collection<Notification>,
}

impl MongoNotificationRepository {
    pub fn new(store: &MongoStore) -> Self {
        MongoNotificationRepository {
            collection: store.database().collection::<Notification>("notifications"),
        }
    }
}

#[async_trait]
impl NotificationRepository for MongoNotificationRepository {
    async fn create(&self, notification: Notification) -> RepositoryResult<Notification> {
        let mut new_notification = notification;
        new_notification.id = Some(ObjectId::new());
        let now = chrono::Utc::now().to_rfc3339();
        new_notification.created_at = Some(now.clone());
        new_notification.updated_at = Some(now);

        self.collection
            .insert_one(new_notification.clone(), None)
            .await
            .map_err(|e| {
                error!("Failed to create notification: {}", e);
                RepositoryError::from(e)
            })?;
        Ok(new_notification)
    }

    async fn update(&self, id: ObjectId, mut notification: Notification) -> RepositoryResult<Notification> {
        notification.updated_at = Some(chrono::Utc::now().to_rfc3339());
        let mut document = bson::to_document(&notification)?;
        document.remove("_id");
        // Callers rebuild the document without the original creation time
        document.remove("created_at");
        match self.collection.update_one(doc! { "_id": id }, doc! { "$set": document }, None).await {
            Ok(result) if result.matched_count > 0 => Ok(notification),
            Ok(_) => Err(RepositoryError::not_found(format!("No notification found for ID: {}", id))),
            Err(e) => Err(RepositoryError::from(e)),
        }
    }

    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        match self.collection.delete_one(doc! { "_id": id }, None).await {
            Ok(result) if result.deleted_count > 0 => Ok(()),
            Ok(_) => Err(RepositoryError::not_found(format!("No notification found for ID: {}", id))),
            Err(e) => Err(RepositoryError::from(e)),
        }
    }

    async fn list(&self, only_active: bool) -> RepositoryResult<Vec<Notification>> {
        let filter = if only_active { Some(doc! { "is_active": true }) } else { None };
        let options = mongodb::options::FindOptions::builder().sort(doc! { "created_at": -1 }).build();
        let mut cursor = self
            .collection
            .find(filter, options)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to list notifications: {}", e)))?;

        let mut notifications = Vec::new();
        while let Some(result) = cursor.next().await {
            notifications.push(result.map_err(|e| {
                RepositoryError::serialization(format!("Failed to deserialize notification: {}", e))
            })?);
        }
        Ok(notifications)
    }
}
