use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Singleton settings document: one live record per store, lazily created
/// with defaults on first read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub store_name: String,
    pub currency: String,
    /// Tax as a percentage of the order subtotal
    pub tax_percentage: f64,
    /// Orders at or above this subtotal ship free
    pub free_shipping_threshold: f64,
    /// Flat fee below the threshold
    pub shipping_fee: f64,
    pub updated_at: Option<String>,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            id: None,
            store_name: "Storefront".to_string(),
            currency: "USD".to_string(),
            tax_percentage: 0.0,
            free_shipping_threshold: 1000.0,
            shipping_fee: 50.0,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FooterLink {
    pub label: String,
    pub url: String,
}

/// Singleton footer document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Footer {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub about_text: String,
    #[serde(default)]
    pub links: Vec<FooterLink>,
    #[serde(default)]
    pub social_links: Vec<FooterLink>,
    pub copyright: String,
    pub updated_at: Option<String>,
}

impl Default for Footer {
    fn default() -> Self {
        Footer {
            id: None,
            about_text: String::new(),
            links: Vec::new(),
            social_links: Vec::new(),
            copyright: "All rights reserved.".to_string(),
            updated_at: None,
        }
    }
}

/// Singleton branding document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebsiteConfig {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub site_title: String,
    pub logo_url: Option<String>,
    pub primary_color: String,
    pub secondary_color: String,
    pub announcement: Option<String>,
    pub updated_at: Option<String>,
}

impl Default for WebsiteConfig {
    fn default() -> Self {
        WebsiteConfig {
            id: None,
            site_title: "Storefront".to_string(),
            logo_url: None,
            primary_color: "#111827".to_string(),
            secondary_color: "#f59e0b".to_string(),
            announcement: None,
            updated_at: None,
        }
    }
}

/// Section tags the storefront renderer knows how to draw. Tags outside this
/// registry resolve to nothing.
pub const KNOWN_SECTIONS: &[&str] = &[
    "carousel",
    "featured-products",
    "new-arrivals",
    "categories",
    "brands",
    "promo-banner",
];

/// Admin-edited ordering entry for one homepage section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeSection {
    pub id: String,
    pub visible: bool,
    pub order: i32,
}

/// Singleton document driving the dynamic homepage layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomePageSettings {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub sections: Vec<HomeSection>,
    pub updated_at: Option<String>,
}

impl Default for HomePageSettings {
    fn default() -> Self {
        HomePageSettings {
            id: None,
            sections: KNOWN_SECTIONS
                .iter()
                .enumerate()
                .map(|(i, tag)| HomeSection { id: (*tag).to_string(), visible: true, order: i as i32 })
                .collect(),
            updated_at: None,
        }
    }
}

impl HomePageSettings {
    /// Resolves the admin-edited list into the ordered tags the storefront
    /// should render: sorted by `order`, invisible entries dropped, tags not
    /// in the registry skipped.
    pub fn resolve_sections(&self) -> Vec<String> {
        let mut sections: Vec<&HomeSection> = self
            .sections
            .iter()
            .filter(|s| s.visible && KNOWN_SECTIONS.contains(&s.id.as_str()))
            .collect();
        sections.sort_by_key(|s| s.order);
        sections.iter().map(|s| s.id.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_defaults() {
        let settings = StoreSettings::default();
        assert_eq!(settings.tax_percentage, 0.0);
        assert!(settings.free_shipping_threshold > 0.0);
    }

    #[test]
    fn test_resolve_orders_and_filters() {
        let settings = HomePageSettings {
            id: None,
            sections: vec![
                HomeSection { id: "new-arrivals".to_string(), visible: true, order: 2 },
                HomeSection { id: "carousel".to_string(), visible: true, order: 0 },
                HomeSection { id: "featured-products".to_string(), visible: false, order: 1 },
            ],
            updated_at: None,
        };
        assert_eq!(settings.resolve_sections(), vec!["carousel", "new-arrivals"]);
    }

    #[test]
    fn test_resolve_skips_unknown_tags() {
        let settings = HomePageSettings {
            id: None,
            sections: vec![
                HomeSection { id: "carousel".to_string(), visible: true, order: 1 },
                HomeSection { id: "legacy-widget".to_string(), visible: true, order: 0 },
            ],
            updated_at: None,
        };
        assert_eq!(settings.resolve_sections(), vec!["carousel"]);
    }

    #[test]
    fn test_default_home_sections_all_known() {
        let settings = HomePageSettings::default();
        assert_eq!(settings.resolve_sections().len(), KNOWN_SECTIONS.len());
    }
}
