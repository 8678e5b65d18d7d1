pub mod auth_handler;
pub mod user_handler;
pub mod product_handler;
pub mod catalog_handler;
pub mod cart_handler;
pub mod wishlist_handler;
pub mod order_handler;
pub mod payment_handler;
pub mod upload_handler;
pub mod site_config_handler;

use bson::oid::ObjectId;
use std::str::FromStr;
use validator::Validate;

use crate::util::error::HandlerError;

/// Runs the validator-derive rules on a request payload.
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), HandlerError> {
    payload
        .validate()
        .map_err(|e| HandlerError::bad_request(format!("Validation error: {}", e)))
}

/// Parses a path segment as a document id.
pub fn parse_object_id(raw: &str) -> Result<ObjectId, HandlerError> {
    ObjectId::from_str(raw).map_err(|_| HandlerError::bad_request(format!("Invalid id '{}'", raw)))
}
