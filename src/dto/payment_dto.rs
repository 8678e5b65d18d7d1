use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct CreatePaymentIntentRequest {
    pub order_id: ObjectId,
}

#[derive(Debug, Serialize)]
pub struct PaymentIntentResponse {
    pub intent_id: String,
    pub client_secret: Option<String>,
    pub amount_minor: i64,
    pub currency: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ConfirmPaymentRequest {
    pub order_id: ObjectId,
    #[validate(length(min = 1, message = "Intent id is required"))]
    pub intent_id: String,
}

/// Client-reported outcome from the redirect gateway. Trusted only after the
/// HMAC signature checks out server-side.
#[derive(Debug, Deserialize, Validate)]
pub struct VerifyRedirectPaymentRequest {
    pub order_id: ObjectId,
    #[validate(length(min = 1, message = "Payment id is required"))]
    pub payment_id: String,
    #[validate(length(min = 1, message = "Signature is required"))]
    pub signature: String,
}
