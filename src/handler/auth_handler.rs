use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect};
use axum::Json;
use std::sync::Arc;

use crate::dto::auth_dto::{LoginRequest, OAuthCallbackQuery, RefreshTokenRequest, RegisterRequest};
use crate::handler::validate_payload;
use crate::service::auth_service::{AuthService, AuthServiceImpl};
use crate::util::error::HandlerError;

pub async fn register_handler(
    State(service): State<Arc<AuthServiceImpl>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    validate_payload(&payload)?;
    let response = service.register(payload).await?;
    Ok(Json(response))
}

pub async fn login_handler(
    State(service): State<Arc<AuthServiceImpl>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    validate_payload(&payload)?;
    let response = service.login(payload).await?;
    Ok(Json(response))
}

pub async fn refresh_token_handler(
    State(service): State<Arc<AuthServiceImpl>>,
    Json(payload): Json<RefreshTokenRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    validate_payload(&payload)?;
    let tokens = service.refresh_token(payload.refresh_token).await?;
    Ok(Json(tokens))
}

/// Sends the browser to the Google consent screen.
pub async fn google_auth_handler(
    State(service): State<Arc<AuthServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let url = service.google_auth_url()?;
    Ok(Redirect::temporary(&url))
}

pub async fn google_callback_handler(
    State(service): State<Arc<AuthServiceImpl>>,
    Query(query): Query<OAuthCallbackQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let response = service.google_callback(query.code).await?;
    Ok(Json(response))
}
