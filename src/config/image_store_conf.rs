use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageStoreConfig {
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket_name: String,
    pub region: Option<String>,
    pub secure: bool,
}

impl ImageStoreConfig {
    /// Load image store configuration from environment variables
    ///
    /// Expected environment variables:
    /// - IMAGE_STORE_ENDPOINT: server endpoint (e.g., "localhost:9000")
    /// - IMAGE_STORE_ACCESS_KEY / IMAGE_STORE_SECRET_KEY
    /// - IMAGE_STORE_BUCKET: bucket name
    /// - IMAGE_STORE_REGION: optional region (defaults to "us-east-1")
    /// - IMAGE_STORE_SECURE: whether to use HTTPS (defaults to false)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading image store configuration from environment variables");

        let endpoint = env::var("IMAGE_STORE_ENDPOINT").map_err(|_| {
            error!("IMAGE_STORE_ENDPOINT environment variable not found");
            ConfigError::EnvVarNotFound("IMAGE_STORE_ENDPOINT".to_string())
        })?;
        debug!("Image store endpoint: {}", endpoint);

        let access_key = env::var("IMAGE_STORE_ACCESS_KEY").map_err(|_| {
            error!("IMAGE_STORE_ACCESS_KEY environment variable not found");
            ConfigError::EnvVarNotFound("IMAGE_STORE_ACCESS_KEY".to_string())
        })?;

        let secret_key = env::var("IMAGE_STORE_SECRET_KEY").map_err(|_| {
            error!("IMAGE_STORE_SECRET_KEY environment variable not found");
            ConfigError::EnvVarNotFound("IMAGE_STORE_SECRET_KEY".to_string())
        })?;

        let bucket_name = env::var("IMAGE_STORE_BUCKET").map_err(|_| {
            error!("IMAGE_STORE_BUCKET environment variable not found");
            ConfigError::EnvVarNotFound("IMAGE_STORE_BUCKET".to_string())
        })?;
        debug!("Image store bucket: {}", bucket_name);

        let region = env::var("IMAGE_STORE_REGION").ok().or_else(|| Some("us-east-1".to_string()));

        let secure = env::var("IMAGE_STORE_SECURE")
            .unwrap_or_else(|_| {
                warn!("IMAGE_STORE_SECURE not set, defaulting to false (HTTP)");
                "false".to_string()
            })
            .parse()
            .unwrap_or(false);

        let config = Self {
            endpoint,
            access_key,
            secret_key,
            bucket_name,
            region,
            secure,
        };

        config.validate()?;
        info!("Image store configuration loaded successfully");
        Ok(config)
    }

    pub fn from_test_env() -> Self {
        ImageStoreConfig {
            endpoint: "localhost:9000".to_string(),
            access_key: "testaccess".to_string(),
            secret_key: "testsecret".to_string(),
            bucket_name: "storefront-test".to_string(),
            region: Some("us-east-1".to_string()),
            secure: false,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.is_empty() {
            return Err(ConfigError::ValidationError("Endpoint cannot be empty".to_string()));
        }
        if self.access_key.is_empty() {
            return Err(ConfigError::ValidationError("Access key cannot be empty".to_string()));
        }
        if self.secret_key.is_empty() {
            return Err(ConfigError::ValidationError("Secret key cannot be empty".to_string()));
        }
        if self.bucket_name.is_empty() {
            return Err(ConfigError::ValidationError("Bucket name cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Full endpoint URL with scheme
    pub fn endpoint_url(&self) -> String {
        if self.secure {
            format!("https://{}", self.endpoint)
        } else {
            format!("http://{}", self.endpoint)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_config_is_valid() {
        assert!(ImageStoreConfig::from_test_env().validate().is_ok());
    }

    #[test]
    fn test_endpoint_url_scheme() {
        let mut config = ImageStoreConfig::from_test_env();
        assert_eq!(config.endpoint_url(), "http://localhost:9000");
        config.secure = true;
        assert_eq!(config.endpoint_url(), "https://localhost:9000");
    }

    #[test]
    fn test_validate_empty_bucket() {
        let mut config = ImageStoreConfig::from_test_env();
        config.bucket_name = "".to_string();
        assert!(config.validate().is_err());
    }
}
