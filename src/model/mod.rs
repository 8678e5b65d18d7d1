pub mod user;
pub mod product;
pub mod category;
pub mod brand;
pub mod cart;
pub mod wishlist;
pub mod order;
pub mod notification;
pub mod site_config;
