use std::env;
use tracing::{info, warn};

use crate::config::ConfigError;

/// Google OAuth configuration. All variables are optional as a group: when
/// absent the OAuth login routes are disabled instead of failing startup.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Callback URL registered with the provider
    pub redirect_uri: String,
    pub auth_url: String,
    pub token_url: String,
    pub userinfo_url: String,
}

impl OAuthConfig {
    /// Load OAuth configuration if the credentials are present.
    ///
    /// Expected environment variables:
    /// - GOOGLE_CLIENT_ID / GOOGLE_CLIENT_SECRET (both required to enable)
    /// - GOOGLE_REDIRECT_URI (required to enable)
    pub fn from_env() -> Option<Self> {
        let client_id = env::var("GOOGLE_CLIENT_ID").ok();
        let client_secret = env::var("GOOGLE_CLIENT_SECRET").ok();
        let redirect_uri = env::var("GOOGLE_REDIRECT_URI").ok();

        match (client_id, client_secret, redirect_uri) {
            (Some(client_id), Some(client_secret), Some(redirect_uri)) => {
                info!("OAuth configuration loaded, Google login enabled");
                Some(OAuthConfig {
                    client_id,
                    client_secret,
                    redirect_uri,
                    auth_url: "https://accounts.google.com/o/oauth2/v2/auth".to_string(),
                    token_url: "https://oauth2.googleapis.com/token".to_string(),
                    userinfo_url: "https://www.googleapis.com/oauth2/v2/userinfo".to_string(),
                })
            }
            _ => {
                warn!("OAuth credentials not set, Google login disabled");
                None
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.client_id.is_empty() || self.client_secret.is_empty() {
            return Err(ConfigError::ValidationError(
                "OAuth client credentials cannot be empty".to_string(),
            ));
        }
        if self.redirect_uri.is_empty() {
            return Err(ConfigError::ValidationError("OAuth redirect URI cannot be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OAuthConfig {
        OAuthConfig {
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            redirect_uri: "http://localhost:8080/api/auth/google/callback".to_string(),
            auth_url: "https://accounts.google.com/o/oauth2/v2/auth".to_string(),
            token_url: "https://oauth2.googleapis.com/token".to_string(),
            userinfo_url: "https://www.googleapis.com/oauth2/v2/userinfo".to_string(),
        }
    }

    #[test]
    fn test_validate_sample() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_client() {
        let mut config = sample();
        config.client_id = "".to_string();
        assert!(config.validate().is_err());
    }
}
