use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Embedded cart line: product reference, selected variant and a price
/// snapshot taken at add-time. The snapshot, not the live product price, is
/// what checkout charges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ObjectId,
    pub quantity: i64,
    pub color: Option<String>,
    pub size: Option<String>,
    pub price: f64,
}

impl CartItem {
    /// Two lines are the same purchasable unit when product and variant match.
    pub fn same_variant(&self, other: &CartItem) -> bool {
        self.product_id == other.product_id && self.color == other.color && self.size == other.size
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    #[serde(default)]
    pub items: Vec<CartItem>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Cart {
    pub fn empty(user_id: ObjectId) -> Self {
        Cart { id: None, user_id, items: Vec::new(), created_at: None, updated_at: None }
    }

    /// Adds a line, merging quantity into an existing line with the same
    /// product and variant so the cart never holds two identical lines.
    pub fn merge_item(&mut self, item: CartItem) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.same_variant(&item)) {
            existing.quantity += item.quantity;
        } else {
            self.items.push(item);
        }
    }

    pub fn remove_item(&mut self, product_id: &ObjectId, color: Option<&str>, size: Option<&str>) {
        self.items.retain(|i| {
            !(i.product_id == *product_id
                && i.color.as_deref() == color
                && i.size.as_deref() == size)
        });
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product_id: ObjectId, qty: i64, color: &str) -> CartItem {
        CartItem {
            product_id,
            quantity: qty,
            color: Some(color.to_string()),
            size: Some("M".to_string()),
            price: 20.0,
        }
    }

    #[test]
    fn test_merge_same_variant_sums_quantity() {
        let product = ObjectId::new();
        let mut cart = Cart::empty(ObjectId::new());
        cart.merge_item(line(product, 2, "black"));
        cart.merge_item(line(product, 3, "black"));
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 5);
    }

    #[test]
    fn test_merge_different_variant_keeps_lines() {
        let product = ObjectId::new();
        let mut cart = Cart::empty(ObjectId::new());
        cart.merge_item(line(product, 1, "black"));
        cart.merge_item(line(product, 1, "white"));
        assert_eq!(cart.items.len(), 2);
    }

    #[test]
    fn test_remove_targets_exact_variant() {
        let product = ObjectId::new();
        let mut cart = Cart::empty(ObjectId::new());
        cart.merge_item(line(product, 1, "black"));
        cart.merge_item(line(product, 1, "white"));
        cart.remove_item(&product, Some("black"), Some("M"));
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].color.as_deref(), Some("white"));
    }
}
