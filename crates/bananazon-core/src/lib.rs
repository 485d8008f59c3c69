//! # bananazon-core: Pure Domain Logic for Bananazon
//!
//! This crate contains the storefront's business rules as pure functions and
//! plain values with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bananazon Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront views                             │   │
//! │  │    Products ──► Product detail ──► Search ──► Cart page         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ subscribe / add_item / ...             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               bananazon-store (CartStore)                       │   │
//! │  │         session state, watch channel, storage port              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bananazon-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  catalog  │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │  filter   │  │   │
//! │  │   │  Review   │  │           │  │ CartItem  │  │  search   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO LOGGING • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog types (Product, Review, Nutrition)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart, line items and the order summary
//! - [`catalog`] - Read-only product catalog with filtering and search
//! - [`seed`] - The built-in banana catalog
//! - [`error`] - Domain error types
//! - [`validation`] - Quantity and query rules
//!
//! ## Example Usage
//!
//! ```rust
//! use bananazon_core::{Cart, Catalog, Money};
//!
//! let catalog = Catalog::seed();
//! let mut cart = Cart::new();
//!
//! cart.add_item(catalog.get(1).unwrap(), 2); // 2 × $4.99
//! cart.add_item(catalog.get(2).unwrap(), 1); // 1 × $6.99
//!
//! assert_eq!(cart.item_count(), 3);
//! assert_eq!(cart.subtotal(), Money::from_cents(1697));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod seed;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartItem, CartTotals};
pub use catalog::{Catalog, CategorySummary, PriceBand, ProductFilter, RatingBand};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Flat shipping charge applied to any non-empty cart.
///
/// The storefront has no shipping calculator; every order ships for the same
/// price. Overridable through the store configuration.
pub const DEFAULT_SHIPPING: Money = Money::from_cents(599);

/// Storage key the cart is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "bananazon-cart";
