//! # Domain Types
//!
//! Catalog types shared by the store and the storefront views.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Types                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Review      │   │   Nutrition     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u32)       │──►│  user           │   │  calories       │       │
//! │  │  name, price    │   │  rating 1-5     │   │  protein, fat   │       │
//! │  │  category       │──►│  date           │   │  carbs, fiber   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products are read-only for the whole system. The cart copies what it needs
//! into a [`crate::CartItem`] snapshot at insertion time.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Product identifier. Unique within a catalog.
pub type ProductId = u32;

// =============================================================================
// Product
// =============================================================================

/// A product listed in the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// One-line description shown on listing cards.
    pub description: String,

    /// Longer copy for the product detail page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,

    /// Unit price.
    pub price: Money,

    /// Image reference (path or URL), never dereferenced here.
    pub image: String,

    /// Category label, e.g. "Organic" or "Exotic".
    pub category: String,

    /// Average rating, 0.0 to 5.0. `None` for unrated products.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reviews: Vec<Review>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<Nutrition>,

    /// Country of origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,

    #[serde(default)]
    pub organic: bool,

    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

impl Product {
    /// Creates a product with only the listing fields set.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Money,
        image: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Product {
            id,
            name: name.into(),
            description: description.into(),
            long_description: None,
            price,
            image: image.into(),
            category: category.into(),
            rating: None,
            reviews: Vec::new(),
            nutrition: None,
            origin: None,
            organic: false,
            in_stock: true,
        }
    }

    /// Sets the rating.
    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Returns the mean of the review ratings, if there are any reviews.
    ///
    /// The listed `rating` is curated separately and may differ.
    pub fn review_average(&self) -> Option<f32> {
        if self.reviews.is_empty() {
            return None;
        }
        let total: u32 = self.reviews.iter().map(|r| u32::from(r.rating)).sum();
        Some(total as f32 / self.reviews.len() as f32)
    }
}

// =============================================================================
// Review
// =============================================================================

/// A customer review on the product detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Review {
    pub id: u32,
    pub user: String,
    /// Star rating, 1 to 5.
    pub rating: u8,
    pub comment: String,
    pub date: NaiveDate,
}

// =============================================================================
// Nutrition
// =============================================================================

/// Nutrition facts per banana. Values other than calories are display strings
/// ("1.3g") exactly as printed on the label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Nutrition {
    pub calories: u32,
    pub protein: String,
    pub fat: String,
    pub carbs: String,
    pub fiber: String,
    pub sugar: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn review(id: u32, rating: u8) -> Review {
        Review {
            id,
            user: format!("user{}", id),
            rating,
            comment: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
        }
    }

    #[test]
    fn test_product_new_defaults() {
        let p = Product::new(1, "Plantains", "Starchy", Money::from_cents(599), "/p.jpg", "Cooking");
        assert_eq!(p.rating, None);
        assert!(p.reviews.is_empty());
        assert!(p.in_stock);
        assert!(!p.organic);
    }

    #[test]
    fn test_review_average() {
        let mut p = Product::new(1, "Red", "", Money::from_cents(699), "", "Exotic");
        assert_eq!(p.review_average(), None);

        p.reviews = vec![review(1, 5), review(2, 4)];
        assert_eq!(p.review_average(), Some(4.5));
    }

    #[test]
    fn test_product_json_shape() {
        let p = Product::new(7, "Burro", "Lemony", Money::from_cents(749), "/b.jpg", "Specialty")
            .with_rating(4.3);
        let json = serde_json::to_value(&p).unwrap();

        assert_eq!(json["price"], 749);
        assert_eq!(json["inStock"], true);
        assert!(json.get("longDescription").is_none());
        assert!(json.get("reviews").is_none());

        // Missing optional fields default on the way back in.
        let minimal = r#"{"id":7,"name":"Burro","description":"Lemony","price":749,
                          "image":"/b.jpg","category":"Specialty"}"#;
        let back: Product = serde_json::from_str(minimal).unwrap();
        assert!(back.in_stock);
        assert_eq!(back.rating, None);
    }
}
