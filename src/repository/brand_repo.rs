use crate::model::brand::Brand;
use crate::repository::product_repo::regex_escape;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::repository::MongoStore;
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::StreamExt;
use tracing::{error, info};

#[async_trait]
pub trait BrandRepository: Send + Sync {
    async fn create(&self, brand: Brand) -> RepositoryResult<Brand>;
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Brand>;
    async fn update(&self, id: ObjectId, brand: Brand) -> RepositoryResult<Brand>;
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()>;
    async fn list(&self) -> RepositoryResult<Vec<Brand>>;
    /// Case-insensitive exact-name lookup, for uniqueness checks.
    async fn find_by_name_ci(&self, name: &str) -> RepositoryResult<Option<Brand>>;
}

pub struct MongoBrandRepository {
    collection: mongodb::Collection<Brand>,
}

impl MongoBrandRepository {
    pub fn new(store: &MongoStore) -> Self {
        MongoBrandRepository { collection: store.database().collection::<Brand>("brands") }
    }
}

#[async_trait]
impl BrandRepository for MongoBrandRepository {
    async fn create(&self, brand: Brand) -> RepositoryResult<Brand> {
        let mut new_brand = brand;
        new_brand.id = Some(ObjectId::new());
        let now = chrono::Utc::now().to_rfc3339();
        new_brand.created_at = Some(now.clone());
        new_brand.updated_at = Some(now);

        match self.collection.insert_one(new_brand.clone(), None).await {
            Ok(_) => {
                info!(name = %new_brand.name, "Brand created");
                Ok(new_brand)
            }
            Err(e) => {
                error!("Failed to create brand: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Brand> {
        let brand = self
            .collection
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to fetch brand: {}", e)))?;
        brand.ok_or_else(|| RepositoryError::not_found(format!("Brand not found for ID: {}", id)))
    }

    async fn update(&self, id: ObjectId, mut brand: Brand) -> RepositoryResult<Brand> {
        brand.updated_at = Some(chrono::Utc::now().to_rfc3339());
        let mut document = bson::to_document(&brand)?;
        document.remove("_id");
        match self.collection.update_one(doc! { "_id": id }, doc! { "$set": document }, None).await {
            Ok(result) if result.matched_count > 0 => Ok(brand),
            Ok(_) => Err(RepositoryError::not_found(format!("No brand found for ID: {}", id))),
            Err(e) => Err(RepositoryError::from(e)),
        }
    }

    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        match self.collection.delete_one(doc! { "_id": id }, None).await {
            Ok(result) if result.deleted_count > 0 => Ok(()),
            Ok(_) => Err(RepositoryError::not_found(format!("No brand found for ID: {}", id))),
            Err(e) => Err(RepositoryError::from(e)),
        }
    }

    async fn list(&self) -> RepositoryResult<Vec<Brand>> {
        let options = mongodb::options::FindOptions::builder().sort(doc! { "name": 1 }).build();
        let mut cursor = self
            .collection
            .find(None, options)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to list brands: {}", e)))?;

        let mut brands = Vec::new();
        while let Some(result) = cursor.next().await {
            brands.push(result.map_err(|e| {
                RepositoryError::serialization(format!("Failed to deserialize brand: {}", e))
            })?);
        }
        Ok(brands)
    }

    async fn find_by_name_ci(&self, name: &str) -> RepositoryResult<Option<Brand>> {
        let filter = doc! { "name": { "$regex": format!("^{}$", regex_escape(name)), "$options": "i" } };
        let brand = self
            .collection
            .find_one(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to find brand by name: {}", e)))?;
        Ok(brand)
    }
}
