pub mod jwt;
pub mod image_store;
pub mod password;
pub mod signature;
pub mod error;
