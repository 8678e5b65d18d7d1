use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::cart::Cart;

#[derive(Debug, Deserialize, Validate)]
pub struct AddCartItemRequest {
    pub product_id: ObjectId,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i64,
    pub color: Option<String>,
    pub size: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCartItemRequest {
    pub product_id: ObjectId,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i64,
    pub color: Option<String>,
    pub size: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RemoveCartItemRequest {
    pub product_id: ObjectId,
    pub color: Option<String>,
    pub size: Option<String>,
}

/// Cart as returned to the client. `messages` carries user-visible notices
/// about lines that were pruned because their product went away.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub cart: Cart,
    pub messages: Vec<String>,
}
