use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{error, info, instrument, warn};

use crate::config::OAuthConfig;
use crate::dto::auth_dto::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
use crate::model::user::{Role, User};
use crate::repository::user_repo::{MongoUserRepository, UserRepository};
use crate::util::error::ServiceError;
use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl, TokenPair};
use crate::util::password::{PasswordUtils, PasswordUtilsImpl};

#[derive(Debug, Deserialize)]
struct GoogleTokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    id: String,
    email: String,
    #[serde(default)]
    name: String,
    picture: Option<String>,
    #[serde(default)]
    verified_email: bool,
}

#[async_trait]
pub trait AuthService: Send + Sync {
    async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, ServiceError>;
    async fn login(&self, request: LoginRequest) -> Result<AuthResponse, ServiceError>;
    async fn refresh_token(&self, refresh_token: String) -> Result<TokenPair, ServiceError>;
    /// Builds the Google consent-screen URL the client should redirect to.
    fn google_auth_url(&self) -> Result<String, ServiceError>;
    /// Exchanges the callback code, then finds or creates the account.
    async fn google_callback(&self, code: String) -> Result<AuthResponse, ServiceError>;
}

pub struct AuthServiceImpl {
    pub user_repo: Arc<MongoUserRepository>,
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
    pub oauth_config: Option<OAuthConfig>,
    pub http: reqwest::Client,
}

impl AuthServiceImpl {
    pub fn new(
        user_repo: Arc<MongoUserRepository>,
        jwt_utils: Arc<JwtTokenUtilsImpl>,
        oauth_config: Option<OAuthConfig>,
    ) -> Self {
        Self { user_repo, jwt_utils, oauth_config, http: reqwest::Client::new() }
    }

    fn issue_tokens(&self, user: &User) -> Result<TokenPair, ServiceError> {
        let user_id = user.id.as_ref().map(|id| id.to_hex()).unwrap_or_default();
        self.jwt_utils
            .generate_token_pair(&user_id, &user.email, user.role.as_str())
            .map_err(|e| ServiceError::InternalError(format!("JWT error: {}", e)))
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    #[instrument(skip(self, request), fields(email = %request.email))]
    async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, ServiceError> {
        info!("Registering new user");
        let hash = PasswordUtilsImpl::hash_password(&request.password)
            .map_err(|e| ServiceError::InternalError(format!("Password hash error: {}", e)))?;

        let mut user = User::new(request.name, request.email.to_lowercase(), Role::User);
        user.password_hash = hash;
        // No email-confirmation flow; accounts start usable and the verify
        // flag is a superadmin-controlled switch.
        user.is_verified = true;

        let inserted = self.user_repo.insert(user).await;
        match &inserted {
            Ok(_) => info!("User registered successfully"),
            Err(e) => error!("Failed to register user: {e}"),
        }
        let inserted = inserted?;
        let tokens = self.issue_tokens(&inserted)?;
        Ok(AuthResponse { user: UserResponse::from(inserted), tokens })
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    async fn login(&self, request: LoginRequest) -> Result<AuthResponse, ServiceError> {
        info!("User login attempt");
        let user = self
            .user_repo
            .find_by_email(&request.email.to_lowercase())
            .await?
            .ok_or_else(|| ServiceError::Unauthorized("Invalid credentials".to_string()))?;

        if user.password_hash.is_empty() {
            // OAuth-only account, no password set
            return Err(ServiceError::Unauthorized("Invalid credentials".to_string()));
        }

        let valid = PasswordUtilsImpl::verify_password(&request.password, &user.password_hash)
            .map_err(|e| ServiceError::InternalError(format!("Password verify error: {}", e)))?;
        if !valid {
            warn!("Invalid credentials for user: {}", request.email);
            return Err(ServiceError::Unauthorized("Invalid credentials".to_string()));
        }

        let tokens = self.issue_tokens(&user)?;
        info!("User logged in successfully");
        Ok(AuthResponse { user: UserResponse::from(user), tokens })
    }

    #[instrument(skip(self, refresh_token))]
    async fn refresh_token(&self, refresh_token: String) -> Result<TokenPair, ServiceError> {
        info!("Refreshing token");
        let claims = self
            .jwt_utils
            .validate_refresh_token(&refresh_token)
            .map_err(|e| ServiceError::Unauthorized(format!("Invalid refresh token: {}", e)))?;
        let tokens = self
            .jwt_utils
            .generate_token_pair(&claims.sub, &claims.email, &claims.role)
            .map_err(|e| ServiceError::InternalError(format!("JWT error: {}", e)))?;
        Ok(tokens)
    }

    fn google_auth_url(&self) -> Result<String, ServiceError> {
        let config = self
            .oauth_config
            .as_ref()
            .ok_or_else(|| ServiceError::InvalidInput("Google login is not enabled".to_string()))?;
        Ok(format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&access_type=offline",
            config.auth_url,
            urlencoding::encode(&config.client_id),
            urlencoding::encode(&config.redirect_uri),
            urlencoding::encode("openid email profile"),
        ))
    }

    #[instrument(skip(self, code))]
    async fn google_callback(&self, code: String) -> Result<AuthResponse, ServiceError> {
        let config = self
            .oauth_config
            .as_ref()
            .ok_or_else(|| ServiceError::InvalidInput("Google login is not enabled".to_string()))?;

        info!("Exchanging OAuth authorization code");
        let token_response = self
            .http
            .post(&config.token_url)
            .form(&[
                ("code", code.as_str()),
                ("client_id", config.client_id.as_str()),
                ("client_secret", config.client_secret.as_str()),
                ("redirect_uri", config.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| ServiceError::InternalError(format!("OAuth token exchange failed: {}", e)))?;

        if !token_response.status().is_success() {
            error!("OAuth token endpoint returned {}", token_response.status());
            return Err(ServiceError::Unauthorized("OAuth code rejected".to_string()));
        }
        let token: GoogleTokenResponse = token_response
            .json()
            .await
            .map_err(|e| ServiceError::InternalError(format!("Malformed OAuth token response: {}", e)))?;

        let userinfo: GoogleUserInfo = self
            .http
            .get(&config.userinfo_url)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(|e| ServiceError::InternalError(format!("OAuth userinfo request failed: {}", e)))?
            .json()
            .await
            .map_err(|e| ServiceError::InternalError(format!("Malformed OAuth userinfo response: {}", e)))?;

        // Find by google_id first, then link an existing email account,
        // then create a fresh account.
        let user = if let Some(user) = self.user_repo.find_by_google_id(&userinfo.id).await? {
            user
        } else if let Some(mut user) = self.user_repo.find_by_email(&userinfo.email.to_lowercase()).await? {
            info!("Linking Google identity to existing account");
            user.google_id = Some(userinfo.id.clone());
            if user.avatar.is_none() {
                user.avatar = userinfo.picture.clone();
            }
            let id = user
                .id
                .ok_or_else(|| ServiceError::InternalError("Stored user has no id".to_string()))?;
            self.user_repo.update(id, user).await?
        } else {
            info!("Creating account from Google identity");
            let mut user = User::new(userinfo.name.clone(), userinfo.email.to_lowercase(), Role::User);
            user.google_id = Some(userinfo.id.clone());
            user.avatar = userinfo.picture.clone();
            user.is_verified = userinfo.verified_email;
            self.user_repo.insert(user).await?
        };

        let tokens = self.issue_tokens(&user)?;
        Ok(AuthResponse { user: UserResponse::from(user), tokens })
    }
}
