use std::env;
use tracing::error;

use crate::config::ConfigError;

/// Seed account created on first startup so the admin console is reachable
/// before any user exists.
#[derive(Debug, Clone)]
pub struct SuperadminConfig {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SuperadminConfig {
    /// Expected environment variables:
    /// - SUPERADMIN_NAME (defaults to "Superadmin")
    /// - SUPERADMIN_EMAIL (required)
    /// - SUPERADMIN_PASSWORD (required, min 8 chars)
    pub fn from_env() -> Result<Self, ConfigError> {
        let name = env::var("SUPERADMIN_NAME").unwrap_or_else(|_| "Superadmin".to_string());
        let email = env::var("SUPERADMIN_EMAIL")
            .map_err(|_| ConfigError::EnvVarNotFound("SUPERADMIN_EMAIL".to_string()))?;
        let password = env::var("SUPERADMIN_PASSWORD")
            .map_err(|_| ConfigError::EnvVarNotFound("SUPERADMIN_PASSWORD".to_string()))?;

        if password.len() < 8 {
            error!("SUPERADMIN_PASSWORD is too short (minimum 8 characters)");
            return Err(ConfigError::InvalidValue(
                "SUPERADMIN_PASSWORD must be at least 8 characters".to_string(),
            ));
        }

        Ok(SuperadminConfig { name, email, password })
    }
}
