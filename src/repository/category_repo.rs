use crate::model::category::Category;
use crate::repository::product_repo::regex_escape;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::repository::MongoStore;
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::StreamExt;
use tracing::{error, info};

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, category: Category) -> RepositoryResult<Category>;
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Category>;
    async fn update(&self, id: ObjectId, category: Category) -> RepositoryResult<Category>;
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()>;
    async fn list(&self) -> RepositoryResult<Vec<Category>>;
    /// Case-insensitive exact-name lookup, for uniqueness checks.
    async fn find_by_name_ci(&self, name: &str) -> RepositoryResult<Option<Category>>;
}

pub struct MongoCategoryRepository {
    collection: mongodb::Collection<Category>,
}

impl MongoCategoryRepository {
    pub fn new(store: &MongoStore) -> Self {
        MongoCategoryRepository { collection: store.database().collection::<Category>("categories") }
    }
}

#[async_trait]
impl CategoryRepository for MongoCategoryRepository {
    async fn create(&self, category: Category) -> RepositoryResult<Category> {
        let mut new_category = category;
        new_category.id = Some(ObjectId::new());
        let now = chrono::Utc::now().to_rfc3339();
        new_category.created_at = Some(now.clone());
        new_category.updated_at = Some(now);

        match self.collection.insert_one(new_category.clone(), None).await {
            Ok(_) => {
                info!(name = %new_category.name, "Category created");
                Ok(new_category)
            }
            Err(e) => {
                error!("Failed to create category: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Category> {
        let category = self
            .collection
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to fetch category: {}", e)))?;
        category.ok_or_else(|| RepositoryError::not_found(format!("Category not found for ID: {}", id)))
    }

    async fn update(&self, id: ObjectId, mut category: Category) -> RepositoryResult<Category> {
        category.updated_at = Some(chrono::Utc::now().to_rfc3339());
        let mut document = bson::to_document(&category)?;
        document.remove("_id");
        match self.collection.update_one(doc! { "_id": id }, doc! { "$set": document }, None).await {
            Ok(result) if result.matched_count > 0 => Ok(category),
            Ok(_) => Err(RepositoryError::not_found(format!("No category found for ID: {}", id))),
            Err(e) => Err(RepositoryError::from(e)),
        }
    }

    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        match self.collection.delete_one(doc! { "_id": id }, None).await {
            Ok(result) if result.deleted_count > 0 => Ok(()),
            Ok(_) => Err(RepositoryError::not_found(format!("No category found for ID: {}", id))),
            Err(e) => Err(RepositoryError::from(e)),
        }
    }

    async fn list(&self) -> RepositoryResult<Vec<Category>> {
        let options = mongodb::options::FindOptions::builder().sort(doc! { "name": 1 }).build();
        let mut cursor = self
            .collection
            .find(None, options)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to list categories: {}", e)))?;

        let mut categories = Vec::new();
        while let Some(result) = cursor.next().await {
            categories.push(result.map_err(|e| {
                RepositoryError::serialization(format!("Failed to deserialize category: {}", e))
            })?);
        }
        Ok(categories)
    }

    async fn find_by_name_ci(&self, name: &str) -> RepositoryResult<Option<Category>> {
        let filter = doc! { "name": { "$regex": format!("^{}$", regex_escape(name)), "$options": "i" } };
        let category = self
            .collection
            .find_one(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to find category by name: {}", e)))?;
        Ok(category)
    }
}
