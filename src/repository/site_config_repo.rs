use crate::model::site_config::{Footer, HomePageSettings, StoreSettings, WebsiteConfig};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::repository::MongoStore;
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use mongodb::Collection;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::error;

/// Gateway over the four singleton documents that drive the storefront:
/// store settings, footer, branding, and homepage layout. Each lives alone
/// in its own collection and is lazily seeded with defaults on first read.
#[async_trait]
pub trait SiteConfigRepository: Send + Sync {
    async fn get_store_settings(&self) -> RepositoryResult<StoreSettings>;
    async fn update_store_settings(&self, settings: StoreSettings) -> RepositoryResult<StoreSettings>;
    async fn get_footer(&self) -> RepositoryResult<Footer>;
    async fn update_footer(&self, footer: Footer) -> RepositoryResult<Footer>;
    async fn get_website_config(&self) -> RepositoryResult<WebsiteConfig>;
    async fn update_website_config(&self, config: WebsiteConfig) -> RepositoryResult<WebsiteConfig>;
    async fn get_home_page_settings(&self) -> RepositoryResult<HomePageSettings>;
    async fn update_home_page_settings(&self, settings: HomePageSettings) -> RepositoryResult<HomePageSettings>;
}

pub struct MongoSiteConfigRepository {
    store_settings: Collection<StoreSettings>,
    footer: Collection<Footer>,
    website_config: Collection<WebsiteConfig>,
    home_page: Collection<HomePageSettings>,
}

impl MongoSiteConfigRepository {
    pub fn new(store: &MongoStore) -> Self {
        let db = store.database();
        MongoSiteConfigRepository {
            store_settings: db.collection::<StoreSettings>("store_settings"),
            footer: db.collection::<Footer>("footer"),
            website_config: db.collection::<WebsiteConfig>("website_config"),
            home_page: db.collection::<HomePageSettings>("home_page_settings"),
        }
    }

    async fn get_or_seed<T>(collection: &Collection<T>, seed: T, set_id: fn(&mut T, ObjectId)) -> RepositoryResult<T>
    where
        T: Serialize + DeserializeOwned + Clone + Unpin + Send + Sync,
    {
        let existing = collection
            .find_one(None, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to fetch singleton: {}", e)))?;

        if let Some(document) = existing {
            return Ok(document);
        }

        let mut seeded = seed;
        set_id(&mut seeded, ObjectId::new());
        collection.insert_one(seeded.clone(), None).await.map_err(|e| {
            error!("Failed to seed singleton document: {}", e);
            RepositoryError::from(e)
        })?;
        Ok(seeded)
    }

    async fn replace_singleton<T>(
        collection: &Collection<T>,
        id: Option<ObjectId>,
        document: T,
    ) -> RepositoryResult<T>
    where
        T: Serialize + DeserializeOwned + Clone + Unpin + Send + Sync,
    {
        let id = id.ok_or_else(|| RepositoryError::validation("Singleton has no id".to_string()))?;
        let mut update = bson::to_document(&document)?;
        update.remove("_id");
        match collection.update_one(doc! { "_id": id }, doc! { "$set": update }, None).await {
            Ok(result) if result.matched_count > 0 => Ok(document),
            Ok(_) => Err(RepositoryError::not_found(format!("No singleton found for ID: {}", id))),
            Err(e) => Err(RepositoryError::from(e)),
        }
    }
}

#[async_trait]
impl SiteConfigRepository for MongoSiteConfigRepository {
    async fn get_store_settings(&self) -> RepositoryResult<StoreSettings> {
        Self::get_or_seed(&self.store_settings, StoreSettings::default(), |s, id| s.id = Some(id)).await
    }

    async fn update_store_settings(&self, mut settings: StoreSettings) -> RepositoryResult<StoreSettings> {
        settings.updated_at = Some(chrono::Utc::now().to_rfc3339());
        Self::replace_singleton(&self.store_settings, settings.id, settings).await
    }

    async fn get_footer(&self) -> RepositoryResult<Footer> {
        Self::get_or_seed(&self.footer, Footer::default(), |f, id| f.id = Some(id)).await
    }

    async fn update_footer(&self, mut footer: Footer) -> RepositoryResult<Footer> {
        footer.updated_at = Some(chrono::Utc::now().to_rfc3339());
        Self::replace_singleton(&self.footer, footer.id, footer).await
    }

    async fn get_website_config(&self) -> RepositoryResult<WebsiteConfig> {
        Self::get_or_seed(&self.website_config, WebsiteConfig::default(), |c, id| c.id = Some(id)).await
    }

    async fn update_website_config(&self, mut config: WebsiteConfig) -> RepositoryResult<WebsiteConfig> {
        config.updated_at = Some(chrono::Utc::now().to_rfc3339());
        Self::replace_singleton(&self.website_config, config.id, config).await
    }

    async fn get_home_page_settings(&self) -> RepositoryResult<HomePageSettings> {
        Self::get_or_seed(&self.home_page, HomePageSettings::default(), |h, id| h.id = Some(id)).await
    }

    async fn update_home_page_settings(&self, mut settings: HomePageSettings) -> RepositoryResult<HomePageSettings> {
        settings.updated_at = Some(chrono::Utc::now().to_rfc3339());
        Self::replace_singleton(&self.home_page, settings.id, settings).await
    }
}
