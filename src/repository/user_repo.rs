use crate::model::user::{Role, User};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::repository::MongoStore;
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::StreamExt;
use tracing::{error, info};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: User) -> RepositoryResult<User>;
    async fn update(&self, id: ObjectId, user: User) -> RepositoryResult<User>;
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    async fn find_by_google_id(&self, google_id: &str) -> RepositoryResult<Option<User>>;
    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<User>>;
    async fn list(&self, page: u64, limit: i64) -> RepositoryResult<Vec<User>>;
    async fn count(&self) -> RepositoryResult<u64>;
    async fn set_role(&self, id: ObjectId, role: Role) -> RepositoryResult<()>;
    async fn set_verified(&self, id: ObjectId, verified: bool) -> RepositoryResult<()>;
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()>;
}

pub struct MongoUserRepository {
    collection: mongodb::Collection<User>,
}

impl MongoUserRepository {
    pub fn new(store: &MongoStore) -> Self {
        MongoUserRepository { collection: store.database().collection::<User>("users") }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn insert(&self, mut user: User) -> RepositoryResult<User> {
        // Uniqueness check: the email column is the account identity
        if let Some(_existing) = self.find_by_email(&user.email).await? {
            return Err(RepositoryError::already_exists(format!(
                "A user with email {} already exists",
                user.email
            )));
        }

        user.id = Some(ObjectId::new());
        let now = chrono::Utc::now().to_rfc3339();
        user.created_at = Some(now.clone());
        user.updated_at = Some(now);

        match self.collection.insert_one(user.clone(), None).await {
            Ok(_) => {
                info!(user_id = ?user.id, "User created");
                Ok(user)
            }
            Err(e) => {
                error!("Failed to insert user: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    async fn update(&self, id: ObjectId, mut user: User) -> RepositoryResult<User> {
        user.updated_at = Some(chrono::Utc::now().to_rfc3339());
        let filter = doc! { "_id": id };
        let mut document = bson::to_document(&user)?;
        document.remove("_id");
        let update = doc! { "$set": document };
        match self.collection.update_one(filter, update, None).await {
            Ok(result) if result.matched_count > 0 => Ok(user),
            Ok(_) => Err(RepositoryError::not_found(format!("No user found for ID: {}", id))),
            Err(e) => {
                error!("Failed to update user: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let filter = doc! { "email": email };
        let user = self
            .collection
            .find_one(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to find user by email: {}", e)))?;
        Ok(user)
    }

    async fn find_by_google_id(&self, google_id: &str) -> RepositoryResult<Option<User>> {
        let filter = doc! { "google_id": google_id };
        let user = self
            .collection
            .find_one(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to find user by google id: {}", e)))?;
        Ok(user)
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<User>> {
        let filter = doc! { "_id": id };
        let user = self
            .collection
            .find_one(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to find user by id: {}", e)))?;
        Ok(user)
    }

    async fn list(&self, page: u64, limit: i64) -> RepositoryResult<Vec<User>> {
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
            .map_err(|e| RepositoryError::database(format!("Failed to list users: {}", e)))?;

        let mut users = Vec::new();
        while let Some(result) = cursor.next().await {
            match result {
                Ok(user) => users.push(user),
                Err(e) => {
                    error!("Failed to deserialize user: {}", e);
                    return Err(RepositoryError::serialization(format!("Failed to deserialize user: {}", e)));
                }
            }
        }
        Ok(users)
    }

    async fn count(&self) -> RepositoryResult<u64> {
        self.collection
            .count_documents(None, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to count users: {}", e)))
    }

    async fn set_role(&self, id: ObjectId, role: Role) -> RepositoryResult<()> {
        let update = doc! { "$set": { "role": role.as_str(), "updated_at": chrono::Utc::now().to_rfc3339() } };
        match self.collection.update_one(doc! { "_id": id }, update, None).await {
            Ok(result) if result.matched_count > 0 => Ok(()),
            Ok(_) => Err(RepositoryError::not_found(format!("No user found for ID: {}", id))),
            Err(e) => Err(RepositoryError::from(e)),
        }
    }

    async fn set_verified(&self, id: ObjectId, verified: bool) -> RepositoryResult<()> {
        let update = doc! { "$set": { "is_verified": verified, "updated_at": chrono::Utc::now().to_rfc3339() } };
        match self.collection.update_one(doc! { "_id": id }, update, None).await {
            Ok(result) if result.matched_count > 0 => Ok(()),
            Ok(_) => Err(RepositoryError::not_found(format!("No user found for ID: {}", id))),
            Err(e) => Err(RepositoryError::from(e)),
        }
    }

    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        match self.collection.delete_one(doc! { "_id": id }, None).await {
            Ok(result) if result.deleted_count > 0 => {
                info!("User deleted: {}", id);
                Ok(())
            }
            Ok(_) => Err(RepositoryError::not_found(format!("No user found for ID: {}", id))),
            Err(e) => {
                error!("Failed to delete user: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }
}
