use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{info, instrument};

use crate::dto::cart_dto::{AddCartItemRequest, CartResponse, RemoveCartItemRequest, UpdateCartItemRequest};
use crate::model::cart::{Cart, CartItem};
use crate::repository::cart_repo::{CartRepository, MongoCartRepository};
use crate::repository::product_repo::{MongoProductRepository, ProductRepository};
use crate::util::error::ServiceError;

#[async_trait]
pub trait CartService: Send + Sync {
    async fn get_cart(&self, user_id: ObjectId) -> Result<CartResponse, ServiceError>;
    async fn add_item(&self, user_id: ObjectId, request: AddCartItemRequest) -> Result<CartResponse, ServiceError>;
    async fn update_quantity(
        &self,
        user_id: ObjectId,
        request: UpdateCartItemRequest,
    ) -> Result<CartResponse, ServiceError>;
    async fn remove_item(
        &self,
        user_id: ObjectId,
        request: RemoveCartItemRequest,
    ) -> Result<CartResponse, ServiceError>;
    async fn clear(&self, user_id: ObjectId) -> Result<CartResponse, ServiceError>;
}

pub struct CartServiceImpl {
    pub cart_repo: Arc<MongoCartRepository>,
    pub product_repo: Arc<MongoProductRepository>,
}

impl CartServiceImpl {
    pub fn new(cart_repo: Arc<MongoCartRepository>, product_repo: Arc<MongoProductRepository>) -> Self {
        Self { cart_repo, product_repo }
    }

    /// Drops lines whose product no longer exists or is no longer
    /// purchasable, persisting the pruned cart. Returns the cart plus a
    /// user-visible message per dropped line.
    async fn prune(&self, mut cart: Cart) -> Result<(Cart, Vec<String>), ServiceError> {
        let mut messages = Vec::new();
        let mut kept = Vec::with_capacity(cart.items.len());

        for item in cart.items.drain(..) {
            match self.product_repo.find_by_id(&item.product_id).await? {
                Some(product) if product.is_purchasable() => kept.push(item),
                Some(product) => {
                    messages.push(format!("'{}' is no longer available and was removed from your cart", product.name));
                }
                None => {
                    messages.push("An item in your cart is no longer sold and was removed".to_string());
                }
            }
        }

        cart.items = kept;
        if !messages.is_empty() {
            cart = self.cart_repo.save(cart).await?;
        }
        Ok((cart, messages))
    }
}

#[async_trait]
impl CartService for CartServiceImpl {
    async fn get_cart(&self, user_id: ObjectId) -> Result<CartResponse, ServiceError> {
        let cart = self.cart_repo.get_or_create(user_id).await?;
        let (cart, messages) = self.prune(cart).await?;
        Ok(CartResponse { cart, messages })
    }

    #[instrument(skip(self, request), fields(user_id = %user_id, product_id = %request.product_id))]
    async fn add_item(&self, user_id: ObjectId, request: AddCartItemRequest) -> Result<CartResponse, ServiceError> {
        let product = self
            .product_repo
            .find_by_id(&request.product_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Product not found".to_string()))?;

        if !product.is_purchasable() {
            return Err(ServiceError::InvalidInput(format!("'{}' is not available", product.name)));
        }
        product
            .variant_is_valid(request.color.as_deref(), request.size.as_deref())
            .map_err(ServiceError::InvalidInput)?;
        if request.quantity > product.quantity {
            return Err(ServiceError::InvalidInput(format!(
                "Only {} unit(s) of '{}' in stock",
                product.quantity, product.name
            )));
        }

        let cart = self.cart_repo.get_or_create(user_id).await?;
        let (mut cart, messages) = self.prune(cart).await?;
        cart.merge_item(CartItem {
            product_id: request.product_id,
            quantity: request.quantity,
            color: request.color,
            size: request.size,
            price: product.price,
        });
        let cart = self.cart_repo.save(cart).await?;
        info!("Item added to cart");
        Ok(CartResponse { cart, messages })
    }

    #[instrument(skip(self, request), fields(user_id = %user_id, product_id = %request.product_id))]
    async fn update_quantity(
        &self,
        user_id: ObjectId,
        request: UpdateCartItemRequest,
    ) -> Result<CartResponse, ServiceError> {
        let cart = self.cart_repo.get_or_create(user_id).await?;
        let (mut cart, mut messages) = self.prune(cart).await?;

        let position = cart.items.iter().position(|i| {
            i.product_id == request.product_id
                && i.color == request.color
                && i.size == request.size
        });
        let Some(position) = position else {
            // The line may have just been pruned; surface that instead of a
            // bare 404.
            if !messages.is_empty() {
                let cart = self.cart_repo.save(cart).await?;
                return Ok(CartResponse { cart, messages });
            }
            return Err(ServiceError::NotFound("Item not found in cart".to_string()));
        };

        match self.product_repo.find_by_id(&request.product_id).await? {
            Some(product) if product.is_purchasable() => {
                if request.quantity > product.quantity {
                    return Err(ServiceError::InvalidInput(format!(
                        "Only {} unit(s) of '{}' in stock",
                        product.quantity, product.name
                    )));
                }
                cart.items[position].quantity = request.quantity;
            }
            Some(product) => {
                cart.items.remove(position);
                messages.push(format!("'{}' is no longer available and was removed from your cart", product.name));
            }
            None => {
                cart.items.remove(position);
                messages.push("This item is no longer sold and was removed from your cart".to_string());
            }
        }

        let cart = self.cart_repo.save(cart).await?;
        Ok(CartResponse { cart, messages })
    }

    async fn remove_item(
        &self,
        user_id: ObjectId,
        request: RemoveCartItemRequest,
    ) -> Result<CartResponse, ServiceError> {
        let cart = self.cart_repo.get_or_create(user_id).await?;
        let (mut cart, messages) = self.prune(cart).await?;
        cart.remove_item(&request.product_id, request.color.as_deref(), request.size.as_deref());
        let cart = self.cart_repo.save(cart).await?;
        Ok(CartResponse { cart, messages })
    }

    async fn clear(&self, user_id: ObjectId) -> Result<CartResponse, ServiceError> {
        let mut cart = self.cart_repo.get_or_create(user_id).await?;
        cart.clear();
        let cart = self.cart_repo.save(cart).await?;
        info!(user_id = %user_id, "Cart cleared");
        Ok(CartResponse { cart, messages: Vec::new() })
    }
}
