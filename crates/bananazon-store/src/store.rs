//! # Cart Store
//!
//! The session's single source of truth for the shopping cart.
//!
//! ## Thread Safety
//! The cart sits behind a `Mutex` inside an `Arc`, so a `CartStore` handle is
//! cheap to clone and can be handed to every view. Each operation holds the
//! lock for its whole read-modify-persist-publish step, which makes every
//! state transition all-or-nothing.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  View Action            Store Call             Effect                   │
//! │  ───────────            ──────────             ──────                   │
//! │                                                                         │
//! │  "Add to cart" ───────► add_item(p, n) ──┐                              │
//! │  "+" / "-" ───────────► update_quantity ─┤    changed?                  │
//! │  Trash icon ──────────► remove_item(id) ─┼──► ├─ no ─► nothing          │
//! │  "Clear" ─────────────► clear_cart() ────┘    └─ yes ─► 1. save         │
//! │                                                         2. publish      │
//! │                                                                         │
//! │  Cart badge / summary ► item_count, subtotal, totals (read only)       │
//! │  Any view ────────────► subscribe() ─────────► watch::Receiver         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Semantics
//! No operation returns an error. A storage write that fails is logged and
//! the in-memory change stands; an unreadable stored value at startup gives
//! an empty cart.

use std::sync::{Arc, Mutex, PoisonError};

use bananazon_core::{Cart, CartItem, CartTotals, Money, Product, ProductId};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::persist;
use crate::storage::{CartStorage, MemoryStorage};

/// Handle to the session's cart.
///
/// Clones share the same cart; create one per application session with
/// [`CartStore::open`] and pass clones to the views.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<Inner>,
}

struct Inner {
    cart: Mutex<Cart>,
    storage: Arc<dyn CartStorage>,
    key: String,
    shipping: Money,
    changes: watch::Sender<Arc<Cart>>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.inner.key)
            .field("lines", &self.with_cart(Cart::line_count))
            .finish()
    }
}

impl CartStore {
    /// Opens the store, restoring the cart saved under the configured key.
    ///
    /// Never fails: a missing, unreadable or incompatible stored value
    /// yields an empty cart.
    pub fn open(storage: Arc<dyn CartStorage>, config: &StoreConfig) -> Self {
        let cart = restore(storage.as_ref(), &config.storage_key);
        let (changes, _) = watch::channel(Arc::new(cart.clone()));

        CartStore {
            inner: Arc::new(Inner {
                cart: Mutex::new(cart),
                storage,
                key: config.storage_key.clone(),
                shipping: config.shipping(),
                changes,
            }),
        }
    }

    /// A store over fresh [`MemoryStorage`] with default settings.
    pub fn in_memory() -> Self {
        Self::open(Arc::new(MemoryStorage::new()), &StoreConfig::default())
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds `quantity` of `product`, merging into an existing line.
    ///
    /// Quantities below 1 are ignored. Returns whether the cart changed.
    pub fn add_item(&self, product: &Product, quantity: i64) -> bool {
        debug!(product_id = product.id, quantity, "add_item");
        self.mutate("add_item", |cart| cart.add_item(product, quantity))
    }

    /// Adds a single unit of `product`.
    pub fn add_one(&self, product: &Product) -> bool {
        self.add_item(product, 1)
    }

    /// Removes the line for `id`. Unknown ids are a no-op.
    pub fn remove_item(&self, id: ProductId) -> bool {
        debug!(product_id = id, "remove_item");
        self.mutate("remove_item", |cart| cart.remove_item(id))
    }

    /// Sets the quantity of the line for `id`.
    ///
    /// Unknown ids and quantities below 1 are ignored.
    pub fn update_quantity(&self, id: ProductId, quantity: i64) -> bool {
        debug!(product_id = id, quantity, "update_quantity");
        self.mutate("update_quantity", |cart| cart.update_quantity(id, quantity))
    }

    /// Empties the cart.
    pub fn clear_cart(&self) -> bool {
        debug!("clear_cart");
        self.mutate("clear_cart", Cart::clear)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust
    /// use bananazon_store::CartStore;
    ///
    /// let store = CartStore::in_memory();
    /// let lines = store.with_cart(|cart| cart.line_count());
    /// assert_eq!(lines, 0);
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.inner.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Current line items, in insertion order.
    pub fn items(&self) -> Vec<CartItem> {
        self.with_cart(|cart| cart.items().to_vec())
    }

    /// Shared immutable snapshot of the current cart.
    pub fn snapshot(&self) -> Arc<Cart> {
        self.inner.changes.borrow().clone()
    }

    /// Sum of all quantities.
    pub fn item_count(&self) -> i64 {
        self.with_cart(Cart::item_count)
    }

    /// Σ price × quantity, without shipping.
    pub fn subtotal(&self) -> Money {
        self.with_cart(Cart::subtotal)
    }

    /// Order summary with the configured flat shipping.
    pub fn totals(&self) -> CartTotals {
        let shipping = self.inner.shipping;
        self.with_cart(|cart| cart.totals(shipping))
    }

    pub fn is_empty(&self) -> bool {
        self.with_cart(Cart::is_empty)
    }

    /// Subscribes to cart changes.
    ///
    /// The receiver starts at the current cart and is notified after every
    /// operation that changed it. No-op operations do not notify.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Cart>> {
        self.inner.changes.subscribe()
    }

    /// Storage key this store persists under.
    pub fn storage_key(&self) -> &str {
        &self.inner.key
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn mutate<F>(&self, op: &'static str, f: F) -> bool
    where
        F: FnOnce(&mut Cart) -> bool,
    {
        let mut cart = self.inner.cart.lock().unwrap_or_else(PoisonError::into_inner);

        if !f(&mut cart) {
            debug!(op, "Cart unchanged");
            return false;
        }

        let snapshot = Arc::new(cart.clone());
        self.persist(op, &snapshot);
        self.inner.changes.send_replace(snapshot);
        true
    }

    /// Writes the cart through the storage port. Failures are logged only.
    fn persist(&self, op: &'static str, cart: &Cart) {
        let result = persist::encode(cart)
            .and_then(|text| self.inner.storage.save(&self.inner.key, &text));

        if let Err(e) = result {
            warn!(op, key = %self.inner.key, error = %e, "Failed to persist cart");
        }
    }
}

/// Reads the stored cart, falling back to empty on any problem.
fn restore(storage: &dyn CartStorage, key: &str) -> Cart {
    match storage.load(key) {
        Ok(Some(text)) => match persist::decode(&text) {
            Ok(cart) => {
                info!(
                    key,
                    lines = cart.line_count(),
                    items = cart.item_count(),
                    "Restored cart"
                );
                cart
            }
            Err(e) => {
                warn!(key, error = %e, "Stored cart is unreadable, starting empty");
                Cart::new()
            }
        },
        Ok(None) => {
            debug!(key, "No stored cart, starting empty");
            Cart::new()
        }
        Err(e) => {
            warn!(key, error = %e, "Failed to read stored cart, starting empty");
            Cart::new()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
