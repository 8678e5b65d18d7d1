use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::order::Order;
use crate::model::user::Address;

/// One requested line on a "buy now" order.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OrderItemInput {
    pub product_id: ObjectId,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i64,
    pub color: Option<String>,
    pub size: Option<String>,
}

/// Checkout request. When `items` is absent the order is built from the
/// user's cart, which is then cleared on success.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate]
    pub items: Option<Vec<OrderItemInput>>,
    pub shipping_address: Address,
    #[validate(length(min = 1, message = "Payment method is required"))]
    pub payment_method: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CancelOrderRequest {
    #[validate(length(min = 1, max = 1000, message = "A cancellation reason is required"))]
    pub reason: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReturnOrderRequest {
    #[validate(length(min = 1, max = 1000, message = "A return reason is required"))]
    pub reason: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateOrderStatusRequest {
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
    pub tracking_number: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReturnDecisionRequest {
    /// Approved, Rejected or Completed
    #[validate(length(min = 1, message = "Return status is required"))]
    pub return_status: String,
}

#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<Order>,
    pub total: u64,
    pub page: u64,
    pub limit: i64,
}
