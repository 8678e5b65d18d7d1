use std::env;
use tracing::{info, warn};

use crate::config::ConfigError;

/// Card-style gateway (payment-intent creation/confirmation). Optional as a
/// group: absence disables card payments instead of failing startup.
#[derive(Debug, Clone)]
pub struct CardGatewayConfig {
    pub secret_key: String,
    pub api_base: String,
}

impl CardGatewayConfig {
    /// Expected environment variables:
    /// - CARD_GATEWAY_SECRET_KEY (required to enable)
    /// - CARD_GATEWAY_API_BASE (defaults to https://api.stripe.com/v1)
    pub fn from_env() -> Option<Self> {
        match env::var("CARD_GATEWAY_SECRET_KEY") {
            Ok(secret_key) => {
                let api_base = env::var("CARD_GATEWAY_API_BASE")
                    .unwrap_or_else(|_| "https://api.stripe.com/v1".to_string());
                info!("Card gateway configuration loaded");
                Some(CardGatewayConfig { secret_key, api_base })
            }
            Err(_) => {
                warn!("CARD_GATEWAY_SECRET_KEY not set, card payments disabled");
                None
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret_key.is_empty() {
            return Err(ConfigError::ValidationError("Card gateway secret key cannot be empty".to_string()));
        }
        if self.api_base.is_empty() {
            return Err(ConfigError::ValidationError("Card gateway API base cannot be empty".to_string()));
        }
        Ok(())
    }
}

/// Redirect/order-based gateway requiring HMAC signature verification of the
/// client-reported payment result. Only the shared secret lives server-side;
/// the public key id stays in the storefront client.
#[derive(Debug, Clone)]
pub struct RedirectGatewayConfig {
    pub key_secret: String,
}

impl RedirectGatewayConfig {
    /// Expected environment variables:
    /// - REDIRECT_GATEWAY_KEY_SECRET (required to enable)
    pub fn from_env() -> Option<Self> {
        match env::var("REDIRECT_GATEWAY_KEY_SECRET") {
            Ok(key_secret) => {
                info!("Redirect gateway configuration loaded");
                Some(RedirectGatewayConfig { key_secret })
            }
            Err(_) => {
                warn!("REDIRECT_GATEWAY_KEY_SECRET not set, redirect payments disabled");
                None
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.key_secret.is_empty() {
            return Err(ConfigError::ValidationError(
                "Redirect gateway secret cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_gateway_validate() {
        let config = CardGatewayConfig {
            secret_key: "sk_test_123".to_string(),
            api_base: "https://api.stripe.com/v1".to_string(),
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_redirect_gateway_empty_secret_rejected() {
        let config = RedirectGatewayConfig { key_secret: "".to_string() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_redirect_gateway_secret_accepted() {
        let config = RedirectGatewayConfig { key_secret: "shhh".to_string() };
        assert!(config.validate().is_ok());
    }
}
