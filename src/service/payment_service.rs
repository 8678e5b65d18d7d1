use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::Utc;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::config::{CardGatewayConfig, RedirectGatewayConfig};
use crate::dto::payment_dto::PaymentIntentResponse;
use crate::model::order::{Order, PaymentResult};
use crate::repository::order_repo::{MongoOrderRepository, OrderRepository};
use crate::repository::site_config_repo::{MongoSiteConfigRepository, SiteConfigRepository};
use crate::util::error::ServiceError;
use crate::util::signature::verify_payment_signature;

#[derive(Debug, Deserialize)]
struct GatewayIntent {
    id: String,
    client_secret: Option<String>,
    status: String,
}

#[async_trait]
pub trait PaymentService: Send + Sync {
    /// Creates a card-gateway payment intent for an order's total.
    async fn create_intent(&self, order_id: ObjectId, user_id: ObjectId) -> Result<PaymentIntentResponse, ServiceError>;
    /// Confirms a card-gateway intent and marks the order paid on success.
    async fn confirm_intent(&self, order_id: ObjectId, user_id: ObjectId, intent_id: String) -> Result<Order, ServiceError>;
    /// Verifies a redirect-gateway result reported by the client and marks
    /// the order paid. The signature is checked before anything is trusted.
    async fn verify_redirect_payment(
        &self,
        order_id: ObjectId,
        user_id: ObjectId,
        payment_id: String,
        signature: String,
    ) -> Result<Order, ServiceError>;
}

pub struct PaymentServiceImpl {
    pub order_repo: Arc<MongoOrderRepository>,
    pub site_config_repo: Arc<MongoSiteConfigRepository>,
    pub card_gateway: Option<CardGatewayConfig>,
    pub redirect_gateway: Option<RedirectGatewayConfig>,
    pub http: reqwest::Client,
}

impl PaymentServiceImpl {
    pub fn new(
        order_repo: Arc<MongoOrderRepository>,
        site_config_repo: Arc<MongoSiteConfigRepository>,
        card_gateway: Option<CardGatewayConfig>,
        redirect_gateway: Option<RedirectGatewayConfig>,
    ) -> Self {
        Self { order_repo, site_config_repo, card_gateway, redirect_gateway, http: reqwest::Client::new() }
    }

    async fn owned_order(&self, order_id: ObjectId, user_id: ObjectId) -> Result<Order, ServiceError> {
        let order = self.order_repo.get_by_id(order_id).await?;
        if order.user_id != user_id {
            return Err(ServiceError::Forbidden("This order belongs to another user".to_string()));
        }
        Ok(order)
    }

    async fn mark_paid(&self, mut order: Order, payment_id: String) -> Result<Order, ServiceError> {
        let now = Utc::now().to_rfc3339();
        order.is_paid = true;
        order.paid_at = Some(now.clone());
        order.payment_result = Some(PaymentResult {
            id: payment_id,
            status: "COMPLETED".to_string(),
            update_time: now,
        });
        Ok(self.order_repo.save(order).await?)
    }
}

#[async_trait]
impl PaymentService for PaymentServiceImpl {
    #[instrument(skip(self), fields(order_id = %order_id))]
    async fn create_intent(&self, order_id: ObjectId, user_id: ObjectId) -> Result<PaymentIntentResponse, ServiceError> {
        let gateway = self
            .card_gateway
            .as_ref()
            .ok_or_else(|| ServiceError::InvalidInput("Card payments are not enabled".to_string()))?;

        let order = self.owned_order(order_id, user_id).await?;
        if order.is_paid {
            return Err(ServiceError::Conflict("Order is already paid".to_string()));
        }

        let settings = self.site_config_repo.get_store_settings().await?;
        let amount_minor = (order.total * 100.0).round() as i64;
        let currency = settings.currency.to_lowercase();

        info!(amount_minor, %currency, "Creating payment intent");
        let response = self
            .http
            .post(format!("{}/payment_intents", gateway.api_base))
            .bearer_auth(&gateway.secret_key)
            .form(&[
                ("amount", amount_minor.to_string()),
                ("currency", currency.clone()),
                ("metadata[order_number]", order.order_number.clone()),
            ])
            .send()
            .await
            .map_err(|e| ServiceError::InternalError(format!("Payment gateway request failed: {}", e)))?;

        if !response.status().is_success() {
            warn!("Payment gateway returned {}", response.status());
            return Err(ServiceError::InternalError("Payment gateway rejected the request".to_string()));
        }
        let intent: GatewayIntent = response
            .json()
            .await
            .map_err(|e| ServiceError::InternalError(format!("Malformed gateway response: {}", e)))?;

        Ok(PaymentIntentResponse {
            intent_id: intent.id,
            client_secret: intent.client_secret,
            amount_minor,
            currency,
        })
    }

    #[instrument(skip(self, intent_id), fields(order_id = %order_id))]
    async fn confirm_intent(&self, order_id: ObjectId, user_id: ObjectId, intent_id: String) -> Result<Order, ServiceError> {
        let gateway = self
            .card_gateway
            .as_ref()
            .ok_or_else(|| ServiceError::InvalidInput("Card payments are not enabled".to_string()))?;

        let order = self.owned_order(order_id, user_id).await?;
        if order.is_paid {
            return Err(ServiceError::Conflict("Order is already paid".to_string()));
        }

        // The truth about the intent comes from the gateway, not the client.
        let response = self
            .http
            .get(format!("{}/payment_intents/{}", gateway.api_base, intent_id))
            .bearer_auth(&gateway.secret_key)
            .send()
            .await
            .map_err(|e| ServiceError::InternalError(format!("Payment gateway request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ServiceError::InvalidInput("Unknown payment intent".to_string()));
        }
        let intent: GatewayIntent = response
            .json()
            .await
            .map_err(|e| ServiceError::InternalError(format!("Malformed gateway response: {}", e)))?;

        if intent.status != "succeeded" {
            return Err(ServiceError::InvalidInput(format!(
                "Payment not completed (status: {})",
                intent.status
            )));
        }

        let order = self.mark_paid(order, intent.id).await?;
        info!(order_number = %order.order_number, "Order paid via card gateway");
        Ok(order)
    }

    #[instrument(skip(self, payment_id, signature), fields(order_id = %order_id))]
    async fn verify_redirect_payment(
        &self,
        order_id: ObjectId,
        user_id: ObjectId,
        payment_id: String,
        signature: String,
    ) -> Result<Order, ServiceError> {
        let gateway = self
            .redirect_gateway
            .as_ref()
            .ok_or_else(|| ServiceError::InvalidInput("Redirect payments are not enabled".to_string()))?;

        let order = self.owned_order(order_id, user_id).await?;
        if order.is_paid {
            return Err(ServiceError::Conflict("Order is already paid".to_string()));
        }

        verify_payment_signature(&gateway.key_secret, &order_id.to_hex(), &payment_id, &signature)
            .map_err(|e| {
                warn!("Redirect payment signature rejected: {}", e);
                ServiceError::InvalidInput("Payment signature verification failed".to_string())
            })?;

        let order = self.mark_paid(order, payment_id).await?;
        info!(order_number = %order.order_number, "Order paid via redirect gateway");
        Ok(order)
    }
}
