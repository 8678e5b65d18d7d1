use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::site_config::{FooterLink, HomeSection};

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStoreSettingsRequest {
    #[validate(length(min = 1, max = 200, message = "Store name is required"))]
    pub store_name: String,
    #[validate(length(min = 1, max = 10, message = "Currency is required"))]
    pub currency: String,
    #[validate(range(min = 0.0, max = 100.0, message = "Tax percentage must be between 0 and 100"))]
    pub tax_percentage: f64,
    #[validate(range(min = 0.0, message = "Threshold cannot be negative"))]
    pub free_shipping_threshold: f64,
    #[validate(range(min = 0.0, message = "Shipping fee cannot be negative"))]
    pub shipping_fee: f64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateFooterRequest {
    pub about_text: String,
    #[serde(default)]
    pub links: Vec<FooterLink>,
    #[serde(default)]
    pub social_links: Vec<FooterLink>,
    pub copyright: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateWebsiteConfigRequest {
    #[validate(length(min = 1, max = 200, message = "Site title is required"))]
    pub site_title: String,
    pub logo_url: Option<String>,
    pub primary_color: String,
    pub secondary_color: String,
    pub announcement: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateHomePageRequest {
    pub sections: Vec<HomeSection>,
}

/// Resolved layout the storefront renders, in order.
#[derive(Debug, Serialize)]
pub struct HomePageResponse {
    pub sections: Vec<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NotificationRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, max = 2000, message = "Message is required"))]
    pub message: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}
