use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// One wishlist per user: a set of product references, duplicates rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wishlist {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    #[serde(default)]
    pub product_ids: Vec<ObjectId>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Wishlist {
    pub fn empty(user_id: ObjectId) -> Self {
        Wishlist { id: None, user_id, product_ids: Vec::new(), created_at: None, updated_at: None }
    }

    /// Returns false when the product was already present.
    pub fn add(&mut self, product_id: ObjectId) -> bool {
        if self.product_ids.contains(&product_id) {
            return false;
        }
        self.product_ids.push(product_id);
        true
    }

    pub fn remove(&mut self, product_id: &ObjectId) {
        self.product_ids.retain(|id| id != product_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_rejected() {
        let product = ObjectId::new();
        let mut wishlist = Wishlist::empty(ObjectId::new());
        assert!(wishlist.add(product));
        assert!(!wishlist.add(product));
        assert_eq!(wishlist.product_ids.len(), 1);
    }
}
