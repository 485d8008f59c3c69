//! # Cart
//!
//! The shopping cart as a plain value: line items plus the merge rules that
//! keep them consistent. Persistence and change notification live in
//! `bananazon-store`; everything here is pure.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operation                 Effect on items                              │
//! │  ─────────                 ───────────────                              │
//! │                                                                         │
//! │  add_item(p, n)  ── id present? ── yes ──► items[i].quantity += n       │
//! │                                 └─ no ───► items.push(snapshot(p, n))   │
//! │                                                                         │
//! │  update_quantity(id, n) ─────────────────► items[i].quantity = n        │
//! │                                                                         │
//! │  remove_item(id) ────────────────────────► items.retain(id != ..)       │
//! │                                                                         │
//! │  clear() ────────────────────────────────► items.clear()                │
//! │                                                                         │
//! │  Unknown ids and quantities below 1 leave the cart untouched.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutator reports whether the cart actually changed, so the store knows
//! when to persist and notify.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Product, ProductId};
use crate::validation::MIN_QUANTITY;

// =============================================================================
// Cart Item
// =============================================================================

/// A line item in the cart.
///
/// ## Snapshot Pattern
/// The listing fields are copied from the [`Product`] when the item is first
/// added. Later catalog changes (a price drop, a renamed product) do not
/// reach items already in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Unit price at time of adding.
    pub price: Money,
    pub image: String,
    pub category: String,
    pub quantity: i64,
}

impl CartItem {
    /// Creates a line item from a product snapshot and a quantity.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartItem {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            image: product.image.clone(),
            category: product.category.clone(),
            quantity,
        }
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `id` (adding the same product increases quantity)
/// - Insertion order is preserved for display
/// - Quantities below 1 are never written by [`Cart::add_item`] or
///   [`Cart::update_quantity`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Rebuilds a cart from stored line items.
    ///
    /// Lines with a quantity below 1 are dropped. Duplicate ids are merged
    /// into the first occurrence (quantities summed). Both cart invariants
    /// hold whatever the input looked like.
    pub fn from_items(items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut cart = Cart::new();
        for item in items {
            if item.quantity < MIN_QUANTITY {
                continue;
            }
            match cart.items.iter_mut().find(|i| i.id == item.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity)
                }
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// Adds a product, or merges into the existing line for the same id.
    ///
    /// ## Returns
    /// `false` (and no change) when `quantity` is below 1.
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> bool {
        if quantity < MIN_QUANTITY {
            return false;
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.id == product.id) {
            item.quantity = item.quantity.saturating_add(quantity);
            return true;
        }

        self.items.push(CartItem::from_product(product, quantity));
        true
    }

    /// Sets the quantity of the line for `id`.
    ///
    /// ## Returns
    /// Whether the cart changed: `false` for an unknown id, a quantity below
    /// 1, or a quantity equal to the current one.
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) -> bool {
        if quantity < MIN_QUANTITY {
            return false;
        }

        match self.items.iter_mut().find(|i| i.id == id) {
            Some(item) if item.quantity != quantity => {
                item.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Removes the line for `id`. Returns whether a line was removed.
    pub fn remove_item(&mut self, id: ProductId) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != initial_len
    }

    /// Removes every line. Returns whether the cart had any.
    pub fn clear(&mut self) -> bool {
        let had_items = !self.items.is_empty();
        self.items.clear();
        had_items
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Looks up the line for `id`.
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Sum of all quantities (0 for an empty cart).
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0_i64, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Σ price × quantity, excluding shipping.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Builds the order summary with a flat `shipping` charge.
    pub fn totals(&self, shipping: Money) -> CartTotals {
        CartTotals::new(self, shipping)
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Order summary shown beside the cart.
///
/// ```text
/// ┌───────────────────────────────┐
/// │  Subtotal             $24.95  │
/// │  Shipping              $5.99  │   shipping is charged only when
/// │  ───────────────────────────  │   the subtotal is positive
/// │  Total                $30.94  │
/// └───────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub item_count: i64,
    pub subtotal: Money,
    pub shipping: Money,
    pub total: Money,
}

impl CartTotals {
    pub fn new(cart: &Cart, flat_shipping: Money) -> Self {
        let subtotal = cart.subtotal();
        let shipping = if subtotal.is_positive() {
            flat_shipping
        } else {
            Money::zero()
        };

        CartTotals {
            line_count: cart.line_count(),
            item_count: cart.item_count(),
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_SHIPPING;

    fn test_product(id: ProductId, price_cents: i64) -> Product {
        Product::new(
            id,
            format!("Banana {}", id),
            "A banana for testing",
            Money::from_cents(price_cents),
            "/images/test.jpg",
            "Test",
        )
    }

    #[test]
    fn test_cart_add_item() {
        let mut cart = Cart::new();

        assert!(cart.add_item(&test_product(1, 499), 2));

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.subtotal().cents(), 998);
    }

    #[test]
    fn test_cart_add_same_product_increases_quantity() {
        let mut cart = Cart::new();
        let product = test_product(1, 499);

        cart.add_item(&product, 1);
        cart.add_item(&product, 2);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.get(1).unwrap().quantity, 3);
    }

    #[test]
    fn test_cart_add_keeps_first_snapshot() {
        let mut cart = Cart::new();
        let mut product = test_product(1, 499);
        cart.add_item(&product, 1);

        product.price = Money::from_cents(99);
        product.name = "Renamed".to_string();
        cart.add_item(&product, 1);

        let item = cart.get(1).unwrap();
        assert_eq!(item.price.cents(), 499);
        assert_eq!(item.name, "Banana 1");
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn test_cart_preserves_insertion_order() {
        let mut cart = Cart::new();
        cart.add_item(&test_product(3, 100), 1);
        cart.add_item(&test_product(1, 100), 1);
        cart.add_item(&test_product(3, 100), 1);

        let ids: Vec<_> = cart.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_cart_ignores_non_positive_quantities() {
        let mut cart = Cart::new();
        let product = test_product(1, 499);

        assert!(!cart.add_item(&product, 0));
        assert!(!cart.add_item(&product, -3));
        assert!(cart.is_empty());

        cart.add_item(&product, 2);
        assert!(!cart.update_quantity(1, 0));
        assert!(!cart.update_quantity(1, -1));
        assert_eq!(cart.get(1).unwrap().quantity, 2);
    }

    #[test]
    fn test_cart_update_quantity() {
        let mut cart = Cart::new();
        cart.add_item(&test_product(1, 499), 1);
        cart.add_item(&test_product(2, 699), 4);

        assert!(cart.update_quantity(1, 5));
        assert_eq!(cart.get(1).unwrap().quantity, 5);
        assert_eq!(cart.get(2).unwrap().quantity, 4);

        // Same value and unknown id are both no-ops.
        assert!(!cart.update_quantity(1, 5));
        let before = cart.clone();
        assert!(!cart.update_quantity(99, 7));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_cart_remove_item() {
        let mut cart = Cart::new();
        cart.add_item(&test_product(1, 499), 2);
        cart.add_item(&test_product(2, 699), 1);

        assert!(cart.remove_item(2));
        assert_eq!(cart.line_count(), 1);
        assert!(cart.get(2).is_none());
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.subtotal().cents(), 998);

        let before = cart.clone();
        assert!(!cart.remove_item(2));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_cart_clear() {
        let mut cart = Cart::new();
        cart.add_item(&test_product(1, 499), 2);
        assert!(!cart.is_empty());

        assert!(cart.clear());
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.subtotal(), Money::zero());

        assert!(!cart.clear());
    }

    #[test]
    fn test_cart_subtotal_exact() {
        let mut cart = Cart::new();
        cart.add_item(&test_product(1, 499), 2);
        cart.add_item(&test_product(2, 699), 1);

        assert_eq!(cart.subtotal().cents(), 1697);
    }

    #[test]
    fn test_cart_from_items_merges_duplicates() {
        let a = CartItem::from_product(&test_product(1, 499), 2);
        let b = CartItem::from_product(&test_product(2, 699), 1);
        let a_again = CartItem::from_product(&test_product(1, 1), 3);

        let cart = Cart::from_items(vec![a, b, a_again]);

        assert_eq!(cart.line_count(), 2);
        let first = cart.get(1).unwrap();
        assert_eq!(first.quantity, 5);
        assert_eq!(first.price.cents(), 499);
    }

    #[test]
    fn test_cart_from_items_drops_non_positive_quantities() {
        let zero = CartItem::from_product(&test_product(1, 499), 0);
        let negative = CartItem::from_product(&test_product(2, 699), -3);
        let kept = CartItem::from_product(&test_product(3, 799), 2);
        let negative_dup = CartItem::from_product(&test_product(3, 799), -1);

        let cart = Cart::from_items(vec![zero, negative, kept, negative_dup]);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.subtotal().cents(), 1598);
        assert!(cart.items().iter().all(|i| i.quantity >= 1));
    }

    #[test]
    fn test_totals_flat_shipping() {
        let mut cart = Cart::new();
        let empty = cart.totals(DEFAULT_SHIPPING);
        assert_eq!(empty.shipping, Money::zero());
        assert_eq!(empty.total, Money::zero());

        cart.add_item(&test_product(1, 499), 5);
        let totals = cart.totals(DEFAULT_SHIPPING);
        assert_eq!(totals.line_count, 1);
        assert_eq!(totals.item_count, 5);
        assert_eq!(totals.subtotal.cents(), 2495);
        assert_eq!(totals.shipping.cents(), 599);
        assert_eq!(totals.total.cents(), 3094);
    }

    #[test]
    fn test_cart_json_shape() {
        let mut cart = Cart::new();
        cart.add_item(&test_product(1, 499), 2);

        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(json["items"][0]["id"], 1);
        assert_eq!(json["items"][0]["price"], 499);
        assert_eq!(json["items"][0]["quantity"], 2);
    }
}
