use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{info, instrument, warn};

use crate::dto::auth_dto::{UpdateProfileRequest, UserListResponse, UserResponse};
use crate::model::user::Role;
use crate::repository::user_repo::{MongoUserRepository, UserRepository};
use crate::util::error::ServiceError;
use crate::util::password::{PasswordUtils, PasswordUtilsImpl};

/// Profile self-service plus the superadmin user-management surface.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn get_profile(&self, user_id: ObjectId) -> Result<UserResponse, ServiceError>;
    async fn update_profile(
        &self,
        user_id: ObjectId,
        request: UpdateProfileRequest,
    ) -> Result<UserResponse, ServiceError>;
    async fn change_password(
        &self,
        user_id: ObjectId,
        current_password: String,
        new_password: String,
    ) -> Result<(), ServiceError>;
    async fn list_users(&self, page: u64, limit: i64) -> Result<UserListResponse, ServiceError>;
    async fn set_role(&self, acting: &Role, user_id: ObjectId, role: Role) -> Result<(), ServiceError>;
    async fn set_verified(&self, user_id: ObjectId, verified: bool) -> Result<(), ServiceError>;
    async fn delete_user(&self, acting_id: ObjectId, user_id: ObjectId) -> Result<(), ServiceError>;
}

pub struct UserServiceImpl {
    pub user_repo: Arc<MongoUserRepository>,
}

impl UserServiceImpl {
    pub fn new(user_repo: Arc<MongoUserRepository>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn get_profile(&self, user_id: ObjectId) -> Result<UserResponse, ServiceError> {
        let user = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))?;
        Ok(UserResponse::from(user))
    }

    #[instrument(skip(self, request), fields(user_id = %user_id))]
    async fn update_profile(
        &self,
        user_id: ObjectId,
        request: UpdateProfileRequest,
    ) -> Result<UserResponse, ServiceError> {
        let mut user = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))?;

        if let Some(name) = request.name {
            user.name = name;
        }
        if let Some(address) = request.address {
            user.address = Some(address);
        }
        if let Some(avatar) = request.avatar {
            user.avatar = Some(avatar);
        }

        let updated = self.user_repo.update(user_id, user).await?;
        info!("Profile updated");
        Ok(UserResponse::from(updated))
    }

    #[instrument(skip(self, current_password, new_password), fields(user_id = %user_id))]
    async fn change_password(
        &self,
        user_id: ObjectId,
        current_password: String,
        new_password: String,
    ) -> Result<(), ServiceError> {
        let mut user = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))?;

        if user.password_hash.is_empty() {
            // OAuth-only account, no password set
            return Err(ServiceError::InvalidInput(
                "This account has no password; sign in with Google".to_string(),
            ));
        }

        let valid = PasswordUtilsImpl::verify_password(&current_password, &user.password_hash)
            .map_err(|e| ServiceError::InternalError(format!("Password verify error: {}", e)))?;
        if !valid {
            warn!("Password change rejected: wrong current password");
            return Err(ServiceError::Unauthorized("Current password is incorrect".to_string()));
        }

        user.password_hash = PasswordUtilsImpl::hash_password(&new_password)
            .map_err(|e| ServiceError::InternalError(format!("Password hash error: {}", e)))?;
        self.user_repo.update(user_id, user).await?;
        info!("Password changed");
        Ok(())
    }

    async fn list_users(&self, page: u64, limit: i64) -> Result<UserListResponse, ServiceError> {
        let page = page.max(1);
        let limit = limit.clamp(1, 100);
        let total = self.user_repo.count().await?;
        let users = self.user_repo.list(page, limit).await?;
        Ok(UserListResponse {
            users: users.into_iter().map(UserResponse::from).collect(),
            total,
            page,
            limit,
        })
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn set_role(&self, acting: &Role, user_id: ObjectId, role: Role) -> Result<(), ServiceError> {
        // Only a superadmin may mint another superadmin.
        if role == Role::Superadmin && *acting != Role::Superadmin {
            return Err(ServiceError::Forbidden("Only a superadmin can grant superadmin".to_string()));
        }
        let target = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))?;
        if target.role == Role::Superadmin && *acting != Role::Superadmin {
            return Err(ServiceError::Forbidden("Cannot change a superadmin's role".to_string()));
        }
        self.user_repo.set_role(user_id, role).await?;
        info!(role = role.as_str(), "Role changed");
        Ok(())
    }

    async fn set_verified(&self, user_id: ObjectId, verified: bool) -> Result<(), ServiceError> {
        self.user_repo.set_verified(user_id, verified).await?;
        info!(user_id = %user_id, verified, "Verified flag updated");
        Ok(())
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn delete_user(&self, acting_id: ObjectId, user_id: ObjectId) -> Result<(), ServiceError> {
        if acting_id == user_id {
            return Err(ServiceError::InvalidInput("Cannot delete your own account".to_string()));
        }
        self.user_repo.delete(user_id).await?;
        info!("User deleted");
        Ok(())
    }
}
