use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::site_config::StoreSettings;
use crate::model::user::Address;

/// Days after delivery during which a return may still be requested.
pub const RETURN_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Returned,
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Returned => "Returned",
        }
    }

    pub fn parse(s: &str) -> Option<OrderStatus> {
        match s {
            "Pending" => Some(OrderStatus::Pending),
            "Processing" => Some(OrderStatus::Processing),
            "Shipped" => Some(OrderStatus::Shipped),
            "Delivered" => Some(OrderStatus::Delivered),
            "Cancelled" => Some(OrderStatus::Cancelled),
            "Returned" => Some(OrderStatus::Returned),
            _ => None,
        }
    }

    /// Cancellation is only permitted before the order ships.
    pub fn is_cancellable(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Processing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReturnStatus {
    Requested,
    Approved,
    Rejected,
    Completed,
}

impl ReturnStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ReturnStatus::Requested => "Requested",
            ReturnStatus::Approved => "Approved",
            ReturnStatus::Rejected => "Rejected",
            ReturnStatus::Completed => "Completed",
        }
    }

    pub fn parse(s: &str) -> Option<ReturnStatus> {
        match s {
            "Requested" => Some(ReturnStatus::Requested),
            "Approved" => Some(ReturnStatus::Approved),
            "Rejected" => Some(ReturnStatus::Rejected),
            "Completed" => Some(ReturnStatus::Completed),
            _ => None,
        }
    }
}

/// Order line: immutable snapshot of what was bought at what price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ObjectId,
    pub name: String,
    pub image: Option<String>,
    pub quantity: i64,
    pub color: Option<String>,
    pub size: Option<String>,
    pub price: f64,
}

/// Synthesized or gateway-reported payment outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentResult {
    pub id: String,
    pub status: String,
    pub update_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub order_number: String,
    pub user_id: ObjectId,
    pub items: Vec<OrderItem>,
    pub shipping_address: Address,
    pub payment_method: String,
    pub payment_result: Option<PaymentResult>,
    pub subtotal: f64,
    pub tax: f64,
    pub shipping_cost: f64,
    pub total: f64,
    pub status: OrderStatus,
    pub is_paid: bool,
    pub paid_at: Option<String>,
    pub delivered_at: Option<String>,
    pub tracking_number: Option<String>,
    pub cancelled_at: Option<String>,
    pub cancellation_reason: Option<String>,
    pub return_status: Option<ReturnStatus>,
    pub return_reason: Option<String>,
    pub return_requested_at: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Order {
    /// Generates an order number of the form `ORD-20250101-A1B2C3`.
    pub fn generate_order_number(now: DateTime<Utc>) -> String {
        let id = Uuid::new_v4().simple().to_string();
        format!("ORD-{}-{}", now.format("%Y%m%d"), id[..6].to_uppercase())
    }
}

/// Computed money breakdown for an order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub shipping_cost: f64,
    pub total: f64,
}

/// Rounds to two decimals (cents).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Pricing rule: tax is a percentage of the subtotal from the store settings
/// in effect now; shipping is free above the threshold, a flat fee otherwise.
pub fn compute_totals(subtotal: f64, settings: &StoreSettings) -> OrderTotals {
    let subtotal = round2(subtotal);
    let tax = round2(subtotal * settings.tax_percentage / 100.0);
    let shipping_cost = if subtotal >= settings.free_shipping_threshold {
        0.0
    } else {
        settings.shipping_fee
    };
    OrderTotals {
        subtotal,
        tax,
        shipping_cost,
        total: round2(subtotal + tax + shipping_cost),
    }
}

/// Return-window rule: a return may be requested while
/// `days_since_delivery <= RETURN_WINDOW_DAYS`, where days are whole days
/// (floor). Exactly 30 full days after delivery is still accepted; 31 is not.
pub fn return_window_open(delivered_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    let days_since_delivery = (now - delivered_at).num_days();
    days_since_delivery <= RETURN_WINDOW_DAYS
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_status_parse_roundtrip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
            OrderStatus::Returned,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::parse("Refunded"), None);
    }

    #[test]
    fn test_cancellable_states() {
        assert!(OrderStatus::Pending.is_cancellable());
        assert!(OrderStatus::Processing.is_cancellable());
        assert!(!OrderStatus::Shipped.is_cancellable());
        assert!(!OrderStatus::Delivered.is_cancellable());
    }

    #[test]
    fn test_totals_worked_example() {
        // 2 x 20 + 1 x 30 at 5% tax, free shipping above 1000, flat 50
        let settings = StoreSettings {
            tax_percentage: 5.0,
            free_shipping_threshold: 1000.0,
            shipping_fee: 50.0,
            ..StoreSettings::default()
        };
        let totals = compute_totals(2.0 * 20.0 + 30.0, &settings);
        assert_eq!(totals.subtotal, 70.0);
        assert_eq!(totals.tax, 3.5);
        assert_eq!(totals.shipping_cost, 50.0);
        assert_eq!(totals.total, 123.5);
    }

    #[test]
    fn test_totals_free_shipping_at_threshold() {
        let settings = StoreSettings {
            tax_percentage: 0.0,
            free_shipping_threshold: 100.0,
            shipping_fee: 10.0,
            ..StoreSettings::default()
        };
        assert_eq!(compute_totals(100.0, &settings).shipping_cost, 0.0);
        assert_eq!(compute_totals(99.99, &settings).shipping_cost, 10.0);
    }

    #[test]
    fn test_return_window_boundary() {
        let delivered = Utc::now() - Duration::days(RETURN_WINDOW_DAYS);
        // exactly 30 full days since delivery: accepted (inclusive boundary)
        assert!(return_window_open(delivered, Utc::now()));

        let delivered = Utc::now() - Duration::days(RETURN_WINDOW_DAYS + 1);
        assert!(!return_window_open(delivered, Utc::now()));
    }

    #[test]
    fn test_return_window_floor_semantics() {
        // 30 days and 23 hours is still 30 whole days, so still inside
        let now = Utc::now();
        let delivered = now - Duration::days(RETURN_WINDOW_DAYS) - Duration::hours(23);
        assert!(return_window_open(delivered, now));
    }

    #[test]
    fn test_order_number_shape() {
        let n = Order::generate_order_number(Utc::now());
        assert!(n.starts_with("ORD-"));
        assert_eq!(n.len(), 4 + 8 + 1 + 6);
    }
}
