use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use bson::oid::ObjectId;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::model::user::Role;
use crate::repository::user_repo::{MongoUserRepository, UserRepository};
use crate::util::error::HandlerError;
use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};

pub struct AuthState {
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
    pub user_repo: Arc<MongoUserRepository>,
}

/// Authenticated caller attached to request extensions; everything a handler
/// needs, password hash excluded.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub is_verified: bool,
}

/// Validates the bearer token and loads the account it names. The user is
/// re-fetched on every request so role changes and deletions take effect
/// immediately, not at token expiry.
pub async fn authenticate(
    State(state): State<Arc<AuthState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, HandlerError> {
    let auth_header = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    let token = state
        .jwt_utils
        .extract_token_from_header(auth_header)
        .map_err(|_| unauthorized("Malformed Authorization header"))?;
    let claims = state.jwt_utils.validate_access_token(&token).map_err(|e| {
        debug!("Token rejected: {}", e);
        unauthorized("Invalid or expired token")
    })?;

    let user_id = ObjectId::from_str(&claims.sub).map_err(|_| unauthorized("Invalid token subject"))?;
    let user = state
        .user_repo
        .find_by_id(&user_id)
        .await
        .map_err(|e| {
            warn!("User lookup during authentication failed: {}", e);
            HandlerError::internal("Authentication failed")
        })?
        .ok_or_else(|| unauthorized("Account no longer exists"))?;

    req.extensions_mut().insert(AuthUser {
        id: user_id,
        name: user.name,
        email: user.email,
        role: user.role,
        is_verified: user.is_verified,
    });

    Ok(next.run(req).await)
}

/// Blocks unverified regular accounts; admin roles pass regardless.
pub async fn require_verified(req: Request<Body>, next: Next) -> Result<Response, HandlerError> {
    let user = current_user(&req)?;
    if !user.is_verified && !user.role.is_admin() {
        return Err(forbidden("Account is not verified"));
    }
    Ok(next.run(req).await)
}

pub async fn require_admin(req: Request<Body>, next: Next) -> Result<Response, HandlerError> {
    let user = current_user(&req)?;
    if !user.role.is_admin() {
        return Err(forbidden("Admin access required"));
    }
    Ok(next.run(req).await)
}

pub async fn require_superadmin(req: Request<Body>, next: Next) -> Result<Response, HandlerError> {
    let user = current_user(&req)?;
    if user.role != Role::Superadmin {
        return Err(forbidden("Superadmin access required"));
    }
    Ok(next.run(req).await)
}

fn current_user(req: &Request<Body>) -> Result<&AuthUser, HandlerError> {
    // Role gates are always layered behind `authenticate`
    req.extensions()
        .get::<AuthUser>()
        .ok_or_else(|| unauthorized("Authentication required"))
}

fn unauthorized(message: &str) -> HandlerError {
    HandlerError {
        error: crate::util::error::HandlerErrorKind::Unauthorized,
        message: message.to_string(),
        details: None,
    }
}

fn forbidden(message: &str) -> HandlerError {
    HandlerError {
        error: crate::util::error::HandlerErrorKind::Forbidden,
        message: message.to_string(),
        details: None,
    }
}
