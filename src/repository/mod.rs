pub mod repository_error;
pub mod user_repo;
pub mod product_repo;
pub mod category_repo;
pub mod brand_repo;
pub mod cart_repo;
pub mod wishlist_repo;
pub mod order_repo;
pub mod notification_repo;
pub mod site_config_repo;

use mongodb::options::{ClientOptions, Credential, ResolverConfig};
use mongodb::{Client, Database};

use crate::config::MongoConfig;

/// Shared handle to the document store. Built once at startup; every
/// repository borrows a collection from the same client pool.
#[derive(Debug, Clone)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    pub async fn connect(config: &MongoConfig) -> Result<Self, mongodb::error::Error> {
        let mut client_options =
            ClientOptions::parse_with_resolver_config(&config.uri, ResolverConfig::cloudflare()).await?;
        client_options.app_name = Some("StorefrontBackend".to_string());
        client_options.max_pool_size = Some(config.pool_size);
        client_options.connect_timeout = Some(std::time::Duration::from_secs(config.connection_timeout_secs));

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            client_options.credential = Some(
                Credential::builder()
                    .username(username.clone())
                    .password(password.clone())
                    .build(),
            );
        }

        let client = Client::with_options(client_options)?;
        let database = client.database(&config.database);
        Ok(MongoStore { database })
    }

    pub fn database(&self) -> &Database {
        &self.database
    }
}
