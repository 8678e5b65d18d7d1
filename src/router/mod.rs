pub mod auth_router;
pub mod user_router;
pub mod product_router;
pub mod catalog_router;
pub mod cart_router;
pub mod wishlist_router;
pub mod order_router;
pub mod payment_router;
pub mod upload_router;
pub mod site_config_router;
