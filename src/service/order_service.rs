use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::dto::order_dto::{CreateOrderRequest, OrderListResponse};
use crate::model::order::{
    compute_totals, return_window_open, Order, OrderItem, OrderStatus, PaymentResult, ReturnStatus,
};
use crate::model::user::Role;
use crate::repository::cart_repo::{CartRepository, MongoCartRepository};
use crate::repository::order_repo::{MongoOrderRepository, OrderRepository};
use crate::repository::product_repo::{MongoProductRepository, ProductRepository};
use crate::repository::site_config_repo::{MongoSiteConfigRepository, SiteConfigRepository};
use crate::util::error::ServiceError;

/// Payment method tags settled on delivery rather than at checkout.
const CASH_ON_DELIVERY: &[&str] = &["cod", "cash-on-delivery", "cash_on_delivery"];

#[async_trait]
pub trait OrderService: Send + Sync {
    async fn create_order(&self, user_id: ObjectId, request: CreateOrderRequest) -> Result<Order, ServiceError>;
    async fn get_order(&self, order_id: ObjectId, requester_id: ObjectId, role: Role) -> Result<Order, ServiceError>;
    async fn list_my_orders(&self, user_id: ObjectId) -> Result<Vec<Order>, ServiceError>;
    async fn list_all_orders(&self, page: u64, limit: i64) -> Result<OrderListResponse, ServiceError>;
    async fn cancel_order(&self, order_id: ObjectId, user_id: ObjectId, reason: String) -> Result<Order, ServiceError>;
    async fn request_return(&self, order_id: ObjectId, user_id: ObjectId, reason: String) -> Result<Order, ServiceError>;
    async fn decide_return(&self, order_id: ObjectId, decision: ReturnStatus) -> Result<Order, ServiceError>;
    async fn update_status(
        &self,
        order_id: ObjectId,
        status: OrderStatus,
        tracking_number: Option<String>,
    ) -> Result<Order, ServiceError>;
}

pub struct OrderServiceImpl {
    pub order_repo: Arc<MongoOrderRepository>,
    pub product_repo: Arc<MongoProductRepository>,
    pub cart_repo: Arc<MongoCartRepository>,
    pub site_config_repo: Arc<MongoSiteConfigRepository>,
}

impl OrderServiceImpl {
    pub fn new(
        order_repo: Arc<MongoOrderRepository>,
        product_repo: Arc<MongoProductRepository>,
        cart_repo: Arc<MongoCartRepository>,
        site_config_repo: Arc<MongoSiteConfigRepository>,
    ) -> Self {
        Self { order_repo, product_repo, cart_repo, site_config_repo }
    }

    /// Rolls back stock for lines already decremented during a failed
    /// checkout. Best-effort: a failed restore is logged, not propagated.
    async fn restore_decremented(&self, decremented: &[(ObjectId, i64)]) {
        for (product_id, quantity) in decremented {
            if let Err(e) = self.product_repo.restore_stock(*product_id, *quantity).await {
                error!(product_id = %product_id, "Failed to restore stock after checkout failure: {}", e);
            }
        }
    }
}

#[async_trait]
impl OrderService for OrderServiceImpl {
    #[instrument(skip(self, request), fields(user_id = %user_id))]
    async fn create_order(&self, user_id: ObjectId, request: CreateOrderRequest) -> Result<Order, ServiceError> {
        info!("Creating order");

        if !request.shipping_address.is_complete() {
            return Err(ServiceError::InvalidInput("Shipping address is incomplete".to_string()));
        }
        if request.payment_method.trim().is_empty() {
            return Err(ServiceError::InvalidInput("Payment method is required".to_string()));
        }

        // Requested lines: explicit "buy now" list, or the saved cart.
        let from_cart = request.items.is_none();
        let requested: Vec<(ObjectId, i64, Option<String>, Option<String>, Option<f64>)> = match request.items {
            Some(items) => {
                if items.is_empty() {
                    return Err(ServiceError::InvalidInput("Order must contain at least one item".to_string()));
                }
                items
                    .into_iter()
                    .map(|i| (i.product_id, i.quantity, i.color, i.size, None))
                    .collect()
            }
            None => {
                let cart = self.cart_repo.get_or_create(user_id).await?;
                if cart.items.is_empty() {
                    return Err(ServiceError::InvalidInput("Your cart is empty".to_string()));
                }
                cart.items
                    .into_iter()
                    .map(|i| (i.product_id, i.quantity, i.color, i.size, Some(i.price)))
                    .collect()
            }
        };

        // Step 1: re-fetch every product and validate existence, variant and
        // stock before anything is written. No partial order.
        let mut lines = Vec::with_capacity(requested.len());
        for (product_id, quantity, color, size, snapshot_price) in requested {
            if quantity < 1 {
                return Err(ServiceError::InvalidInput("Quantity must be at least 1".to_string()));
            }
            let product = self
                .product_repo
                .find_by_id(&product_id)
                .await?
                .ok_or_else(|| ServiceError::NotFound(format!("Product {} no longer exists", product_id)))?;
            if !product.is_purchasable() {
                return Err(ServiceError::InvalidInput(format!("'{}' is no longer available", product.name)));
            }
            product
                .variant_is_valid(color.as_deref(), size.as_deref())
                .map_err(ServiceError::InvalidInput)?;
            if product.quantity < quantity {
                return Err(ServiceError::InvalidInput(format!(
                    "Insufficient stock for '{}': {} requested, {} available",
                    product.name, quantity, product.quantity
                )));
            }

            // Price comes from the cart snapshot when there is one; a "buy
            // now" line snapshots the current price here.
            let price = snapshot_price.unwrap_or(product.price);
            lines.push(OrderItem {
                product_id,
                name: product.name.clone(),
                image: product.images.first().map(|i| i.url.clone()),
                quantity,
                color,
                size,
                price,
            });
        }

        // Steps 2-4: money breakdown from the settings in effect now.
        let subtotal: f64 = lines.iter().map(|l| l.price * l.quantity as f64).sum();
        let settings = self.site_config_repo.get_store_settings().await?;
        let totals = compute_totals(subtotal, &settings);

        // Step 5: persist, status Pending. Cash on delivery stays unpaid;
        // any other method gets a synthesized payment result.
        let now = Utc::now();
        let cash = CASH_ON_DELIVERY.contains(&request.payment_method.to_lowercase().as_str());
        let (is_paid, paid_at, payment_result) = if cash {
            (false, None, None)
        } else {
            (
                true,
                Some(now.to_rfc3339()),
                Some(PaymentResult {
                    id: Uuid::new_v4().to_string(),
                    status: "COMPLETED".to_string(),
                    update_time: now.to_rfc3339(),
                }),
            )
        };

        let order = Order {
            id: None,
            order_number: Order::generate_order_number(now),
            user_id,
            items: lines,
            shipping_address: request.shipping_address,
            payment_method: request.payment_method,
            payment_result,
            subtotal: totals.subtotal,
            tax: totals.tax,
            shipping_cost: totals.shipping_cost,
            total: totals.total,
            status: OrderStatus::Pending,
            is_paid,
            paid_at,
            delivered_at: None,
            tracking_number: None,
            cancelled_at: None,
            cancellation_reason: None,
            return_status: None,
            return_reason: None,
            return_requested_at: None,
            created_at: None,
            updated_at: None,
        };
        let order = self.order_repo.create(order).await?;

        // Step 6: decrement stock, one conditional atomic update per product.
        // A concurrent checkout can still win a product between step 1 and
        // here; in that case roll back what was taken and void the order.
        let mut decremented: Vec<(ObjectId, i64)> = Vec::new();
        let mut lost_line: Option<String> = None;
        for item in &order.items {
            match self.product_repo.decrement_stock(item.product_id, item.quantity).await {
                Ok(()) => decremented.push((item.product_id, item.quantity)),
                Err(e) => {
                    warn!(product_id = %item.product_id, "Stock decrement failed during checkout: {}", e);
                    lost_line = Some(item.name.clone());
                    break;
                }
            }
        }
        if let Some(name) = lost_line {
            self.restore_decremented(&decremented).await;
            let mut voided = order;
            voided.status = OrderStatus::Cancelled;
            voided.cancelled_at = Some(Utc::now().to_rfc3339());
            voided.cancellation_reason = Some("Insufficient stock at checkout".to_string());
            if let Err(save_err) = self.order_repo.save(voided).await {
                error!("Failed to void order after stock failure: {}", save_err);
            }
            return Err(ServiceError::InvalidInput(format!("Insufficient stock for '{}'", name)));
        }

        // Step 7: a cart checkout consumes the cart.
        if from_cart {
            let mut cart = self.cart_repo.get_or_create(user_id).await?;
            cart.clear();
            self.cart_repo.save(cart).await?;
        }

        info!(order_number = %order.order_number, total = order.total, "Order created");
        Ok(order)
    }

    async fn get_order(&self, order_id: ObjectId, requester_id: ObjectId, role: Role) -> Result<Order, ServiceError> {
        let order = self.order_repo.get_by_id(order_id).await?;
        if order.user_id != requester_id && !role.is_admin() {
            return Err(ServiceError::Forbidden("This order belongs to another user".to_string()));
        }
        Ok(order)
    }

    async fn list_my_orders(&self, user_id: ObjectId) -> Result<Vec<Order>, ServiceError> {
        Ok(self.order_repo.list_for_user(user_id).await?)
    }

    async fn list_all_orders(&self, page: u64, limit: i64) -> Result<OrderListResponse, ServiceError> {
        let page = page.max(1);
        let limit = limit.clamp(1, 100);
        let (orders, total) = self.order_repo.list_all(page, limit).await?;
        Ok(OrderListResponse { orders, total, page, limit })
    }

    #[instrument(skip(self, reason), fields(order_id = %order_id, user_id = %user_id))]
    async fn cancel_order(&self, order_id: ObjectId, user_id: ObjectId, reason: String) -> Result<Order, ServiceError> {
        let mut order = self.order_repo.get_by_id(order_id).await?;
        if order.user_id != user_id {
            return Err(ServiceError::Forbidden("This order belongs to another user".to_string()));
        }
        if !order.status.is_cancellable() {
            return Err(ServiceError::InvalidInput(format!(
                "Order in status {} can no longer be cancelled",
                order.status.as_str()
            )));
        }

        // Put the stock back, line by line. A line that fails to restore is
        // logged and skipped; the cancellation itself still goes through.
        for item in &order.items {
            if let Err(e) = self.product_repo.restore_stock(item.product_id, item.quantity).await {
                error!(product_id = %item.product_id, "Failed to restore stock on cancellation: {}", e);
            }
        }

        order.status = OrderStatus::Cancelled;
        order.cancelled_at = Some(Utc::now().to_rfc3339());
        order.cancellation_reason = Some(reason);
        let order = self.order_repo.save(order).await?;
        info!(order_number = %order.order_number, "Order cancelled");
        Ok(order)
    }

    #[instrument(skip(self, reason), fields(order_id = %order_id, user_id = %user_id))]
    async fn request_return(&self, order_id: ObjectId, user_id: ObjectId, reason: String) -> Result<Order, ServiceError> {
        let mut order = self.order_repo.get_by_id(order_id).await?;
        if order.user_id != user_id {
            return Err(ServiceError::Forbidden("This order belongs to another user".to_string()));
        }
        if order.status != OrderStatus::Delivered {
            return Err(ServiceError::InvalidInput("Only delivered orders can be returned".to_string()));
        }
        if order.return_status.is_some() {
            return Err(ServiceError::Conflict("A return has already been requested for this order".to_string()));
        }

        let delivered_at = order
            .delivered_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| ServiceError::InternalError("Order has no delivery timestamp".to_string()))?;
        if !return_window_open(delivered_at, Utc::now()) {
            return Err(ServiceError::InvalidInput(
                "The return window for this order has closed".to_string(),
            ));
        }

        order.return_status = Some(ReturnStatus::Requested);
        order.return_reason = Some(reason);
        order.return_requested_at = Some(Utc::now().to_rfc3339());
        let order = self.order_repo.save(order).await?;
        info!(order_number = %order.order_number, "Return requested");
        Ok(order)
    }

    #[instrument(skip(self), fields(order_id = %order_id))]
    async fn decide_return(&self, order_id: ObjectId, decision: ReturnStatus) -> Result<Order, ServiceError> {
        let mut order = self.order_repo.get_by_id(order_id).await?;
        let current = order
            .return_status
            .ok_or_else(|| ServiceError::InvalidInput("No return has been requested for this order".to_string()))?;

        let allowed = matches!(
            (current, decision),
            (ReturnStatus::Requested, ReturnStatus::Approved)
                | (ReturnStatus::Requested, ReturnStatus::Rejected)
                | (ReturnStatus::Approved, ReturnStatus::Completed)
        );
        if !allowed {
            return Err(ServiceError::InvalidInput(format!(
                "Return cannot move from {} to {}",
                current.as_str(),
                decision.as_str()
            )));
        }

        order.return_status = Some(decision);
        let order = self.order_repo.save(order).await?;
        info!(order_number = %order.order_number, decision = decision.as_str(), "Return decision recorded");
        Ok(order)
    }

    #[instrument(skip(self), fields(order_id = %order_id))]
    async fn update_status(
        &self,
        order_id: ObjectId,
        status: OrderStatus,
        tracking_number: Option<String>,
    ) -> Result<Order, ServiceError> {
        let mut order = self.order_repo.get_by_id(order_id).await?;

        order.status = status;
        if status == OrderStatus::Delivered && order.delivered_at.is_none() {
            order.delivered_at = Some(Utc::now().to_rfc3339());
        }
        if let Some(tracking) = tracking_number {
            order.tracking_number = Some(tracking);
        }

        let order = self.order_repo.save(order).await?;
        info!(order_number = %order.order_number, status = status.as_str(), "Order status updated");
        Ok(order)
    }
}
