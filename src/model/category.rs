use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::model::product::ProductImage;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub slug: String,
    pub image: Option<ProductImage>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// URL slug from a display name: lowercase, alphanumerics kept, runs of
/// anything else collapsed to single hyphens.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_hyphen = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Electronics"), "electronics");
        assert_eq!(slugify("Home & Garden"), "home-garden");
        assert_eq!(slugify("  Déco  "), "d-co");
        assert_eq!(slugify("T-Shirts!"), "t-shirts");
    }
}
