pub mod auth_service;
pub mod user_service;
pub mod catalog_service;
pub mod cart_service;
pub mod wishlist_service;
pub mod order_service;
pub mod payment_service;
pub mod site_config_service;
