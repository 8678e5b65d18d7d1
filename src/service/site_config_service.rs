use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{info, instrument};

use crate::dto::site_config_dto::{
    NotificationRequest, UpdateFooterRequest, UpdateHomePageRequest, UpdateStoreSettingsRequest,
    UpdateWebsiteConfigRequest,
};
use crate::model::notification::Notification;
use crate::model::site_config::{Footer, HomePageSettings, StoreSettings, WebsiteConfig};
use crate::repository::notification_repo::{MongoNotificationRepository, NotificationRepository};
use crate::repository::site_config_repo::{MongoSiteConfigRepository, SiteConfigRepository};
use crate::util::error::ServiceError;

#[async_trait]
pub trait SiteConfigService: Send + Sync {
    async fn get_store_settings(&self) -> Result<StoreSettings, ServiceError>;
    async fn update_store_settings(&self, request: UpdateStoreSettingsRequest) -> Result<StoreSettings, ServiceError>;
    async fn get_footer(&self) -> Result<Footer, ServiceError>;
    async fn update_footer(&self, request: UpdateFooterRequest) -> Result<Footer, ServiceError>;
    async fn get_website_config(&self) -> Result<WebsiteConfig, ServiceError>;
    async fn update_website_config(&self, request: UpdateWebsiteConfigRequest) -> Result<WebsiteConfig, ServiceError>;
    async fn get_home_page_settings(&self) -> Result<HomePageSettings, ServiceError>;
    async fn update_home_page_settings(&self, request: UpdateHomePageRequest) -> Result<HomePageSettings, ServiceError>;
    /// Ordered, visible, known section tags the storefront should render.
    async fn resolve_home_page(&self) -> Result<Vec<String>, ServiceError>;
    async fn list_notifications(&self, only_active: bool) -> Result<Vec<Notification>, ServiceError>;
    async fn create_notification(&self, request: NotificationRequest) -> Result<Notification, ServiceError>;
    async fn update_notification(&self, id: ObjectId, request: NotificationRequest) -> Result<Notification, ServiceError>;
    async fn delete_notification(&self, id: ObjectId) -> Result<(), ServiceError>;
}

pub struct SiteConfigServiceImpl {
    pub site_config_repo: Arc<MongoSiteConfigRepository>,
    pub notification_repo: Arc<MongoNotificationRepository>,
}

impl SiteConfigServiceImpl {
    pub fn new(
        site_config_repo: Arc<MongoSiteConfigRepository>,
        notification_repo: Arc<MongoNotificationRepository>,
    ) -> Self {
        Self { site_config_repo, notification_repo }
    }
}

#[async_trait]
impl SiteConfigService for SiteConfigServiceImpl {
    async fn get_store_settings(&self) -> Result<StoreSettings, ServiceError> {
        Ok(self.site_config_repo.get_store_settings().await?)
    }

    #[instrument(skip(self, request))]
    async fn update_store_settings(&self, request: UpdateStoreSettingsRequest) -> Result<StoreSettings, ServiceError> {
        let mut settings = self.site_config_repo.get_store_settings().await?;
        settings.store_name = request.store_name;
        settings.currency = request.currency;
        settings.tax_percentage = request.tax_percentage;
        settings.free_shipping_threshold = request.free_shipping_threshold;
        settings.shipping_fee = request.shipping_fee;
        let settings = self.site_config_repo.update_store_settings(settings).await?;
        info!("Store settings updated");
        Ok(settings)
    }

    async fn get_footer(&self) -> Result<Footer, ServiceError> {
        Ok(self.site_config_repo.get_footer().await?)
    }

    async fn update_footer(&self, request: UpdateFooterRequest) -> Result<Footer, ServiceError> {
        let mut footer = self.site_config_repo.get_footer().await?;
        footer.about_text = request.about_text;
        footer.links = request.links;
        footer.social_links = request.social_links;
        footer.copyright = request.copyright;
        Ok(self.site_config_repo.update_footer(footer).await?)
    }

    async fn get_website_config(&self) -> Result<WebsiteConfig, ServiceError> {
        Ok(self.site_config_repo.get_website_config().await?)
    }

    async fn update_website_config(&self, request: UpdateWebsiteConfigRequest) -> Result<WebsiteConfig, ServiceError> {
        let mut config = self.site_config_repo.get_website_config().await?;
        config.site_title = request.site_title;
        config.logo_url = request.logo_url;
        config.primary_color = request.primary_color;
        config.secondary_color = request.secondary_color;
        config.announcement = request.announcement;
        Ok(self.site_config_repo.update_website_config(config).await?)
    }

    async fn get_home_page_settings(&self) -> Result<HomePageSettings, ServiceError> {
        Ok(self.site_config_repo.get_home_page_settings().await?)
    }

    #[instrument(skip(self, request))]
    async fn update_home_page_settings(&self, request: UpdateHomePageRequest) -> Result<HomePageSettings, ServiceError> {
        if request.sections.is_empty() {
            return Err(ServiceError::InvalidInput("At least one section is required".to_string()));
        }
        let mut settings = self.site_config_repo.get_home_page_settings().await?;
        settings.sections = request.sections;
        let settings = self.site_config_repo.update_home_page_settings(settings).await?;
        info!("Homepage layout updated");
        Ok(settings)
    }

    async fn resolve_home_page(&self) -> Result<Vec<String>, ServiceError> {
        let settings = self.site_config_repo.get_home_page_settings().await?;
        Ok(settings.resolve_sections())
    }

    async fn list_notifications(&self, only_active: bool) -> Result<Vec<Notification>, ServiceError> {
        Ok(self.notification_repo.list(only_active).await?)
    }

    async fn create_notification(&self, request: NotificationRequest) -> Result<Notification, ServiceError> {
        let notification = Notification {
            id: None,
            title: request.title,
            message: request.message,
            is_active: request.is_active,
            created_at: None,
            updated_at: None,
        };
        Ok(self.notification_repo.create(notification).await?)
    }

    async fn update_notification(&self, id: ObjectId, request: NotificationRequest) -> Result<Notification, ServiceError> {
        let notification = Notification {
            id: Some(id),
            title: request.title,
            message: request.message,
            is_active: request.is_active,
            created_at: None,
            updated_at: None,
        };
        Ok(self.notification_repo.update(id, notification).await?)
    }

    async fn delete_notification(&self, id: ObjectId) -> Result<(), ServiceError> {
        self.notification_repo.delete(id).await?;
        Ok(())
    }
}
