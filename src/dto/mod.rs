pub mod auth_dto;
pub mod product_dto;
pub mod cart_dto;
pub mod order_dto;
pub mod payment_dto;
pub mod site_config_dto;
