use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use std::sync::Arc;

use crate::dto::payment_dto::{ConfirmPaymentRequest, CreatePaymentIntentRequest, VerifyRedirectPaymentRequest};
use crate::handler::validate_payload;
use crate::middlewares::auth_middleware::AuthUser;
use crate::service::payment_service::{PaymentService, PaymentServiceImpl};
use crate::util::error::HandlerError;

pub async fn create_intent_handler(
    State(service): State<Arc<PaymentServiceImpl>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreatePaymentIntentRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let intent = service.create_intent(payload.order_id, user.id).await?;
    Ok(Json(intent))
}

pub async fn confirm_payment_handler(
    State(service): State<Arc<PaymentServiceImpl>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<ConfirmPaymentRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    validate_payload(&payload)?;
    let order = service.confirm_intent(payload.order_id, user.id, payload.intent_id).await?;
    Ok(Json(order))
}

pub async fn verify_redirect_payment_handler(
    State(service): State<Arc<PaymentServiceImpl>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<VerifyRedirectPaymentRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    validate_payload(&payload)?;
    let order = service
        .verify_redirect_payment(payload.order_id, user.id, payload.payment_id, payload.signature)
        .await?;
    Ok(Json(order))
}
