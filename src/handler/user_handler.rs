use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use std::sync::Arc;

use crate::dto::auth_dto::{ChangePasswordRequest, SetRoleRequest, SetVerifiedRequest, UpdateProfileRequest};
use crate::dto::product_dto::PageQuery;
use crate::handler::{parse_object_id, validate_payload};
use crate::middlewares::auth_middleware::AuthUser;
use crate::model::user::Role;
use crate::service::user_service::{UserService, UserServiceImpl};
use crate::util::error::HandlerError;

pub async fn get_profile_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse, HandlerError> {
    let profile = service.get_profile(user.id).await?;
    Ok(Json(profile))
}

pub async fn update_profile_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    validate_payload(&payload)?;
    let profile = service.update_profile(user.id, payload).await?;
    Ok(Json(profile))
}

pub async fn change_password_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    validate_payload(&payload)?;
    service.change_password(user.id, payload.current_password, payload.new_password).await?;
    Ok(Json(serde_json::json!({ "message": "Password changed" })))
}

// --- superadmin surface ---

pub async fn list_users_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let response = service.list_users(query.page.unwrap_or(1), query.limit.unwrap_or(20)).await?;
    Ok(Json(response))
}

pub async fn set_role_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Extension(acting): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(payload): Json<SetRoleRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    validate_payload(&payload)?;
    let user_id = parse_object_id(&id)?;
    let role = Role::parse(&payload.role)
        .ok_or_else(|| HandlerError::bad_request(format!("Unknown role '{}'", payload.role)))?;
    service.set_role(&acting.role, user_id, role).await?;
    Ok(Json(serde_json::json!({ "message": "Role updated" })))
}

pub async fn set_verified_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Path(id): Path<String>,
    Json(payload): Json<SetVerifiedRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let user_id = parse_object_id(&id)?;
    service.set_verified(user_id, payload.is_verified).await?;
    Ok(Json(serde_json::json!({ "message": "Verified flag updated" })))
}

pub async fn delete_user_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Extension(acting): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let user_id = parse_object_id(&id)?;
    service.delete_user(acting.id, user_id).await?;
    Ok(Json(serde_json::json!({ "message": "User deleted" })))
}
