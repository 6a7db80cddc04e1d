// src/cart.rs
//
// Cart state lives as a single JSON array per cart, mirroring the
// storefront's old localStorage key. The handlers load the document, apply
// one mutation, and persist the full list back; every mutation response
// carries the recomputed item count and total so the header badge can
// recompute without a separate notification channel.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a stored cart document. A corrupt document silently resets to
    /// an empty cart, same as the storefront did with localStorage.
    pub fn from_json(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.items).unwrap_or_else(|_| "[]".to_string())
    }

    /// Merge by product id: an existing entry gets its quantity bumped,
    /// otherwise the product is appended with quantity 1.
    pub fn add(&mut self, id: i64, name: &str, price: f64) {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            item.quantity += 1;
        } else {
            self.items.push(CartItem {
                id,
                name: name.to_string(),
                price,
                quantity: 1,
            });
        }
    }

    /// Adjust quantity by delta; the entry is dropped when the quantity
    /// would reach zero or below.
    pub fn update_quantity(&mut self, product_id: i64, delta: i32) {
        self.items.retain_mut(|item| {
            if item.id != product_id {
                return true;
            }
            // Saturate: the delta comes straight from the client and must
            // not wrap the quantity negative (which would drop the entry).
            let new_quantity = item.quantity.saturating_add(delta);
            if new_quantity <= 0 {
                false
            } else {
                item.quantity = new_quantity;
                true
            }
        });
    }

    pub fn remove(&mut self, product_id: i64) {
        self.items.retain(|item| item.id != product_id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(|i| i.price * f64::from(i.quantity)).sum()
    }

    /// Total formatted for display, two decimals.
    pub fn total_display(&self) -> String {
        format!("{:.2}", self.total())
    }

    pub fn item_count(&self) -> i32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adding_same_product_twice_merges() {
        let mut cart = Cart::new();
        cart.add(1, "Gouden ring", 49.99);
        cart.add(1, "Gouden ring", 49.99);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn adding_different_products_appends() {
        let mut cart = Cart::new();
        cart.add(1, "Ring", 10.0);
        cart.add(2, "Armband", 5.0);
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[1].quantity, 1);
    }

    #[test]
    fn decrementing_quantity_one_removes_entry() {
        let mut cart = Cart::new();
        cart.add(1, "Ring", 10.0);
        cart.update_quantity(1, -1);
        assert!(cart.is_empty());
    }

    #[test]
    fn update_quantity_adjusts_by_delta() {
        let mut cart = Cart::new();
        cart.add(1, "Ring", 10.0);
        cart.update_quantity(1, 3);
        assert_eq!(cart.items()[0].quantity, 4);
        cart.update_quantity(1, -2);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn huge_delta_saturates_instead_of_wrapping() {
        let mut cart = Cart::new();
        cart.add(1, "Ring", 10.0);
        cart.update_quantity(1, i32::MAX);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, i32::MAX);
    }

    #[test]
    fn huge_negative_delta_removes_entry() {
        let mut cart = Cart::new();
        cart.add(1, "Ring", 10.0);
        cart.update_quantity(1, 1); // qty 2
        cart.update_quantity(1, i32::MIN);
        assert!(cart.is_empty());
    }

    #[test]
    fn update_quantity_ignores_unknown_id() {
        let mut cart = Cart::new();
        cart.add(1, "Ring", 10.0);
        cart.update_quantity(99, -1);
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn remove_deletes_by_id() {
        let mut cart = Cart::new();
        cart.add(1, "Ring", 10.0);
        cart.add(2, "Armband", 5.0);
        cart.remove(1);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].id, 2);
    }

    #[test]
    fn total_is_sum_of_price_times_quantity() {
        let mut cart = Cart::new();
        cart.add(1, "Ring", 10.0);
        cart.update_quantity(1, 1); // qty 2
        cart.add(2, "Armband", 5.0);
        assert_eq!(cart.total(), 25.0);
        assert_eq!(cart.total_display(), "25.00");
    }

    #[test]
    fn item_count_sums_quantities() {
        let mut cart = Cart::new();
        cart.add(1, "Ring", 10.0);
        cart.update_quantity(1, 2);
        cart.add(2, "Armband", 5.0);
        assert_eq!(cart.item_count(), 4);
    }

    #[test]
    fn corrupt_stored_json_resets_to_empty() {
        let cart = Cart::from_json("not valid json {{{");
        assert!(cart.is_empty());
    }

    #[test]
    fn stored_json_round_trips() {
        let mut cart = Cart::new();
        cart.add(1, "Ring", 12.5);
        let restored = Cart::from_json(&cart.to_json());
        assert_eq!(restored.items(), cart.items());
    }
}
