//! # Persisted Cart Codec
//!
//! Encodes the cart into the single string value kept in storage, and back.
//!
//! ## Envelope Format
//! ```json
//! {
//!   "state": {
//!     "items": [
//!       { "id": 1, "name": "Organic Cavendish Bananas", "description": "...",
//!         "price": 499, "image": "/images/cavendish.jpg",
//!         "category": "Organic", "quantity": 2 }
//!     ]
//!   },
//!   "version": 0
//! }
//! ```
//!
//! `price` is integer cents. A bump of [`PERSIST_VERSION`] makes older blobs
//! undecodable, and the store then starts from an empty cart.
//!
//! ## Repair on Decode
//! A blob that parses is repaired rather than rejected: lines with a quantity
//! below 1 are dropped and duplicate ids are merged, so a restored cart obeys
//! the same rules as one built through `Cart::add_item`.

use bananazon_core::{Cart, CartItem};
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Envelope version written by this build.
pub const PERSIST_VERSION: u32 = 0;

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    state: PersistedState,
    #[serde(default)]
    version: u32,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedState {
    #[serde(default)]
    items: Vec<CartItem>,
}

/// Serializes `cart` into the envelope string.
pub fn encode(cart: &Cart) -> StoreResult<String> {
    let envelope = Envelope {
        state: PersistedState {
            items: cart.items().to_vec(),
        },
        version: PERSIST_VERSION,
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Parses an envelope string back into a cart.
///
/// Non-positive quantities are dropped and duplicate ids merged, see
/// [`Cart::from_items`].
pub fn decode(text: &str) -> StoreResult<Cart> {
    let envelope: Envelope = serde_json::from_str(text)?;

    if envelope.version != PERSIST_VERSION {
        return Err(StoreError::UnsupportedVersion {
            found: envelope.version,
            expected: PERSIST_VERSION,
        });
    }

    Ok(Cart::from_items(envelope.state.items))
}
