pub mod app_conf;
pub mod mongo_conf;
pub mod jwt_conf;
pub mod oauth_conf;
pub mod payment_conf;
pub mod image_store_conf;
pub mod superadmin_conf;

pub use app_conf::AppConfig;
pub use mongo_conf::MongoConfig;
pub use jwt_conf::JwtConfig;
pub use oauth_conf::OAuthConfig;
pub use payment_conf::{CardGatewayConfig, RedirectGatewayConfig};
pub use image_store_conf::ImageStoreConfig;
pub use superadmin_conf::SuperadminConfig;

/// Common configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
