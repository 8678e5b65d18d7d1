use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Hosted image reference. `public_id` is the opaque handle used for
/// best-effort deletion at the image store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
    pub public_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub user_id: ObjectId,
    pub name: String,
    pub rating: f64,
    pub comment: String,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub original_price: Option<f64>,
    /// Free-text reference to a category name, not a hard foreign key
    pub category: String,
    /// Free-text reference to a brand name, not a hard foreign key
    pub brand: String,
    /// Ordered; the first image is the listing thumbnail
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    /// On-hand stock
    pub quantity: i64,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_sold: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub num_reviews: i64,
    #[serde(default)]
    pub reviews: Vec<Review>,
    pub sku: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Product {
    /// Generates a SKU of the form `SKU-XXXXXXXX`.
    pub fn generate_sku() -> String {
        let id = Uuid::new_v4().simple().to_string();
        format!("SKU-{}", id[..8].to_uppercase())
    }

    /// Whether the product appears in public listings: active, not flagged
    /// sold, and in stock.
    pub fn is_publicly_listed(&self) -> bool {
        self.is_active && !self.is_sold && self.quantity > 0
    }

    /// Whether the product can still be purchased through the cart.
    pub fn is_purchasable(&self) -> bool {
        self.is_active && !self.is_sold
    }

    /// Validates a variant selection against the declared options. A product
    /// without declared colors/sizes accepts any (absent) selection.
    pub fn variant_is_valid(&self, color: Option<&str>, size: Option<&str>) -> Result<(), String> {
        if !self.colors.is_empty() {
            match color {
                Some(c) if self.colors.iter().any(|v| v == c) => {}
                Some(c) => return Err(format!("Color '{}' is not available for {}", c, self.name)),
                None => return Err(format!("A color must be selected for {}", self.name)),
            }
        }
        if !self.sizes.is_empty() {
            match size {
                Some(s) if self.sizes.iter().any(|v| v == s) => {}
                Some(s) => return Err(format!("Size '{}' is not available for {}", s, self.name)),
                None => return Err(format!("A size must be selected for {}", self.name)),
            }
        }
        Ok(())
    }

    /// Recomputes the rating aggregate from the embedded reviews.
    pub fn recompute_rating(&mut self) {
        self.num_reviews = self.reviews.len() as i64;
        if self.reviews.is_empty() {
            self.rating = 0.0;
        } else {
            let sum: f64 = self.reviews.iter().map(|r| r.rating).sum();
            self.rating = sum / self.reviews.len() as f64;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        Product {
            id: None,
            name: "Canvas Sneaker".to_string(),
            description: "Low-top canvas sneaker".to_string(),
            price: 49.0,
            original_price: Some(59.0),
            category: "Shoes".to_string(),
            brand: "Northway".to_string(),
            images: vec![],
            colors: vec!["black".to_string(), "white".to_string()],
            sizes: vec!["41".to_string(), "42".to_string()],
            quantity: 5,
            is_new: true,
            is_featured: false,
            is_sold: false,
            is_active: true,
            rating: 0.0,
            num_reviews: 0,
            reviews: vec![],
            sku: Product::generate_sku(),
            tags: vec![],
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_public_listing_excludes_unavailable() {
        let mut p = sample_product();
        assert!(p.is_publicly_listed());
        p.quantity = 0;
        assert!(!p.is_publicly_listed());
        p.quantity = 5;
        p.is_sold = true;
        assert!(!p.is_publicly_listed());
        p.is_sold = false;
        p.is_active = false;
        assert!(!p.is_publicly_listed());
    }

    #[test]
    fn test_variant_validation() {
        let p = sample_product();
        assert!(p.variant_is_valid(Some("black"), Some("41")).is_ok());
        assert!(p.variant_is_valid(Some("red"), Some("41")).is_err());
        assert!(p.variant_is_valid(None, Some("41")).is_err());
        assert!(p.variant_is_valid(Some("black"), None).is_err());
    }

    #[test]
    fn test_variant_validation_without_declared_options() {
        let mut p = sample_product();
        p.colors.clear();
        p.sizes.clear();
        assert!(p.variant_is_valid(None, None).is_ok());
    }

    #[test]
    fn test_rating_aggregate() {
        let mut p = sample_product();
        p.reviews.push(Review {
            user_id: ObjectId::new(),
            name: "Ana".to_string(),
            rating: 4.0,
            comment: "Good".to_string(),
            created_at: None,
        });
        p.reviews.push(Review {
            user_id: ObjectId::new(),
            name: "Bruno".to_string(),
            rating: 5.0,
            comment: "Great".to_string(),
            created_at: None,
        });
        p.recompute_rating();
        assert_eq!(p.num_reviews, 2);
        assert!((p.rating - 4.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sku_shape() {
        let sku = Product::generate_sku();
        assert!(sku.starts_with("SKU-"));
        assert_eq!(sku.len(), 12);
    }
}
