//! # bananazon-store: Cart Session State for Bananazon
//!
//! Wraps the pure cart from `bananazon-core` in a shared, persistent,
//! observable store.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     bananazon-store                                     │
//! │                                                                         │
//! │   views ──► CartStore ──┬──► Mutex<Cart>        (bananazon-core)        │
//! │     ▲                   │                                               │
//! │     │                   ├──► persist::encode ──► dyn CartStorage        │
//! │     │                   │                         ├─ MemoryStorage      │
//! │     │                   │                         └─ FileStorage        │
//! │     └── watch::Receiver ◄┘                                              │
//! │                                                                         │
//! │   StoreConfig: storage key, storage dir, shipping, currency display     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`store`] - The `CartStore` handle
//! - [`storage`] - Storage port and its memory/file backends
//! - [`persist`] - Versioned JSON envelope for the stored cart
//! - [`config`] - `store.toml` plus `BANANAZON_*` overrides
//! - [`error`] - Store error types
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use bananazon_core::Catalog;
//! use bananazon_store::{CartStore, MemoryStorage, StoreConfig};
//!
//! let catalog = Catalog::seed();
//! let store = CartStore::open(Arc::new(MemoryStorage::new()), &StoreConfig::default());
//!
//! store.add_item(catalog.get(1).unwrap(), 2);
//! store.add_one(catalog.get(2).unwrap());
//!
//! assert_eq!(store.item_count(), 3);
//! assert_eq!(store.totals().total.cents(), 1697 + 599);
//! ```

pub mod config;
pub mod error;
pub mod persist;
pub mod storage;
pub mod store;

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use storage::{CartStorage, FileStorage, MemoryStorage};
pub use store::CartStore;

use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// Honors `RUST_LOG`; defaults to `info` with debug output for the
/// bananazon crates.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bananazon_store=debug,bananazon_core=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
