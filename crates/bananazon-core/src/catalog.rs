//! # Catalog
//!
//! The read-only product list behind the storefront: lookup by id, category
//! listing, query-string filters and free-text search.
//!
//! ## Filter Parameters
//! ```text
//! /products?category=exotic&price=5to10&rating=4plus
//!              │                │              │
//!              ▼                ▼              ▼
//!     case-insensitive     PriceBand       RatingBand
//!     category match       under5          4plus  (≥ 4.0)
//!                          5to10           3plus  (≥ 3.0)
//!                          over10
//! ```
//!
//! Filters combine with AND. The catalog never changes after construction and
//! the cart never writes back to it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Product, ProductId};

/// Label of the pseudo-category that lists every product.
pub const ALL_CATEGORY: &str = "All";

// =============================================================================
// Price Band
// =============================================================================

/// Price filter from the products page sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PriceBand {
    /// Strictly below $5.
    #[serde(rename = "under5")]
    Under5,
    /// $5 to $10 inclusive.
    #[serde(rename = "5to10")]
    From5To10,
    /// Strictly above $10.
    #[serde(rename = "over10")]
    Over10,
}

impl PriceBand {
    const NAMES: [&'static str; 3] = ["under5", "5to10", "over10"];

    pub fn contains(&self, price: Money) -> bool {
        let five = Money::from_major_minor(5, 0);
        let ten = Money::from_major_minor(10, 0);
        match self {
            PriceBand::Under5 => price < five,
            PriceBand::From5To10 => price >= five && price <= ten,
            PriceBand::Over10 => price > ten,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceBand::Under5 => "under5",
            PriceBand::From5To10 => "5to10",
            PriceBand::Over10 => "over10",
        }
    }
}

impl fmt::Display for PriceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceBand {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "under5" => Ok(PriceBand::Under5),
            "5to10" => Ok(PriceBand::From5To10),
            "over10" => Ok(PriceBand::Over10),
            _ => Err(ValidationError::NotAllowed {
                field: "price".to_string(),
                allowed: Self::NAMES.iter().map(|s| s.to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Rating Band
// =============================================================================

/// Minimum-rating filter. Unrated products never match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RatingBand {
    #[serde(rename = "4plus")]
    FourPlus,
    #[serde(rename = "3plus")]
    ThreePlus,
}

impl RatingBand {
    pub fn minimum(&self) -> f32 {
        match self {
            RatingBand::FourPlus => 4.0,
            RatingBand::ThreePlus => 3.0,
        }
    }

    pub fn contains(&self, rating: Option<f32>) -> bool {
        rating.is_some_and(|r| r >= self.minimum())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RatingBand::FourPlus => "4plus",
            RatingBand::ThreePlus => "3plus",
        }
    }
}

impl fmt::Display for RatingBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RatingBand {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "4plus" => Ok(RatingBand::FourPlus),
            "3plus" => Ok(RatingBand::ThreePlus),
            _ => Err(ValidationError::NotAllowed {
                field: "rating".to_string(),
                allowed: vec!["4plus".to_string(), "3plus".to_string()],
            }),
        }
    }
}

// =============================================================================
// Product Filter
// =============================================================================

/// Combined filter for the products page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductFilter {
    /// Category label, compared case-insensitively.
    pub category: Option<String>,
    pub price: Option<PriceBand>,
    pub rating: Option<RatingBand>,
}

impl ProductFilter {
    /// Builds a filter from raw query-string values.
    ///
    /// Band values that do not parse are dropped rather than rejected, so a
    /// stale or hand-typed link still shows a product list. Use the `FromStr`
    /// impls directly for strict parsing. The [`ALL_CATEGORY`] label means no
    /// category filter.
    pub fn from_params(category: Option<&str>, price: Option<&str>, rating: Option<&str>) -> Self {
        ProductFilter {
            category: category
                .map(str::trim)
                .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case(ALL_CATEGORY))
                .map(str::to_string),
            price: price.and_then(|p| p.parse().ok()),
            rating: rating.and_then(|r| r.parse().ok()),
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            if !product.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        if let Some(band) = self.price {
            if !band.contains(product.price) {
                return false;
            }
        }
        if let Some(band) = self.rating {
            if !band.contains(product.rating) {
                return false;
            }
        }
        true
    }
}

// =============================================================================
// Category Summary
// =============================================================================

/// One row of the category sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategorySummary {
    pub name: String,
    pub count: usize,
}

// =============================================================================
// Catalog
// =============================================================================

/// Read-only product catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Catalog { products }
    }

    /// The built-in banana catalog. See [`crate::seed`].
    pub fn seed() -> Self {
        Catalog::new(crate::seed::products())
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Like [`Catalog::get`] but turns a miss into [`CoreError::ProductNotFound`].
    pub fn require(&self, id: ProductId) -> CoreResult<&Product> {
        self.get(id).ok_or(CoreError::ProductNotFound(id))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Category sidebar: "All" with the total, then each category in order of
    /// first appearance with its product count.
    pub fn categories(&self) -> Vec<CategorySummary> {
        let mut summaries = vec![CategorySummary {
            name: ALL_CATEGORY.to_string(),
            count: self.products.len(),
        }];

        for product in &self.products {
            match summaries
                .iter()
                .skip(1)
                .position(|s| s.name == product.category)
            {
                Some(i) => summaries[i + 1].count += 1,
                None => summaries.push(CategorySummary {
                    name: product.category.clone(),
                    count: 1,
                }),
            }
        }

        summaries
    }

    /// Products matching every condition in `filter`, in catalog order.
    pub fn filter(&self, filter: &ProductFilter) -> Vec<&Product> {
        self.products.iter().filter(|p| filter.matches(p)).collect()
    }

    /// Free-text search over name, description and category.
    ///
    /// The query is lowercased and split on whitespace; a product matches when
    /// any term appears in any of the three fields. A blank query matches
    /// every product.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let query = query.to_lowercase();
        let terms: Vec<&str> = query.split_whitespace().collect();

        if terms.is_empty() {
            return self.products.iter().collect();
        }

        self.products
            .iter()
            .filter(|p| {
                let name = p.name.to_lowercase();
                let description = p.description.to_lowercase();
                let category = p.category.to_lowercase();
                terms.iter().any(|term| {
                    name.contains(term) || description.contains(term) || category.contains(term)
                })
            })
            .collect()
    }

    /// Up to `limit` other products from the same category as `id`.
    pub fn related(&self, id: ProductId, limit: usize) -> Vec<&Product> {
        let Some(product) = self.get(id) else {
            return Vec::new();
        };

        self.products
            .iter()
            .filter(|p| p.id != id && p.category == product.category)
            .take(limit)
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(products: &[&Product]) -> Vec<ProductId> {
        products.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_get_and_require() {
        let catalog = Catalog::seed();
        assert_eq!(catalog.get(2).unwrap().name, "Red Bananas");
        assert!(catalog.get(999).is_none());
        assert!(matches!(
            catalog.require(999),
            Err(CoreError::ProductNotFound(999))
        ));
    }

    #[test]
    fn test_categories_with_counts() {
        let catalog = Catalog::seed();
        let categories = catalog.categories();

        let rows: Vec<(&str, usize)> = categories
            .iter()
            .map(|c| (c.name.as_str(), c.count))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("All", 8),
                ("Organic", 1),
                ("Exotic", 2),
                ("Specialty", 3),
                ("Cooking", 2),
            ]
        );
    }

    #[test]
    fn test_filter_by_category_is_case_insensitive() {
        let catalog = Catalog::seed();
        let filter = ProductFilter::from_params(Some("exotic"), None, None);
        assert_eq!(ids(&catalog.filter(&filter)), vec![2, 6]);

        let all = ProductFilter::from_params(Some("all"), None, None);
        assert_eq!(all.category, None);
        assert_eq!(catalog.filter(&all).len(), 8);
    }

    #[test]
    fn test_filter_by_price_band() {
        let catalog = Catalog::seed();

        let under5 = ProductFilter::from_params(None, Some("under5"), None);
        assert_eq!(ids(&catalog.filter(&under5)), vec![1, 8]);

        let mid = ProductFilter::from_params(None, Some("5to10"), None);
        assert_eq!(ids(&catalog.filter(&mid)), vec![2, 3, 4, 5, 7]);

        let over10 = ProductFilter::from_params(None, Some("over10"), None);
        assert_eq!(ids(&catalog.filter(&over10)), vec![6]);
    }

    #[test]
    fn test_price_band_edges() {
        assert!(!PriceBand::Under5.contains(Money::from_cents(500)));
        assert!(PriceBand::From5To10.contains(Money::from_cents(500)));
        assert!(PriceBand::From5To10.contains(Money::from_cents(1000)));
        assert!(!PriceBand::Over10.contains(Money::from_cents(1000)));
    }

    #[test]
    fn test_filter_combines_conditions() {
        let catalog = Catalog::seed();
        let filter = ProductFilter::from_params(Some("Specialty"), Some("5to10"), Some("4plus"));
        assert_eq!(ids(&catalog.filter(&filter)), vec![3, 5, 7]);
    }

    #[test]
    fn test_rating_band_excludes_unrated() {
        let unrated = Product::new(1, "x", "x", Money::from_cents(100), "", "Test");
        let filter = ProductFilter {
            rating: Some(RatingBand::ThreePlus),
            ..Default::default()
        };
        assert!(!filter.matches(&unrated));
        assert!(filter.matches(&unrated.with_rating(3.0)));
    }

    #[test]
    fn test_unknown_band_is_dropped_from_params_but_rejected_by_parse() {
        let filter = ProductFilter::from_params(None, Some("cheap"), Some("5stars"));
        assert_eq!(filter, ProductFilter::default());

        assert!(matches!(
            "cheap".parse::<PriceBand>(),
            Err(ValidationError::NotAllowed { .. })
        ));
        assert!("5stars".parse::<RatingBand>().is_err());
        assert_eq!("5to10".parse::<PriceBand>().unwrap(), PriceBand::From5To10);
    }

    #[test]
    fn test_band_names_round_trip() {
        for band in [PriceBand::Under5, PriceBand::From5To10, PriceBand::Over10] {
            assert_eq!(band.to_string().parse::<PriceBand>().unwrap(), band);
        }
        for band in [RatingBand::FourPlus, RatingBand::ThreePlus] {
            assert_eq!(band.to_string().parse::<RatingBand>().unwrap(), band);
        }
    }

    #[test]
    fn test_search_any_term() {
        let catalog = Catalog::seed();

        assert_eq!(ids(&catalog.search("raspberry")), vec![2]);
        assert_eq!(ids(&catalog.search("ice")), vec![6]);
        // Any term is enough: "cream" also hits "creamy" in product 1.
        assert_eq!(ids(&catalog.search("Ice Cream")), vec![1, 6]);
        // "cooking" hits the category and a product name.
        assert_eq!(ids(&catalog.search("COOKING")), vec![4, 8]);
        assert!(catalog.search("durian").is_empty());
    }

    #[test]
    fn test_blank_search_matches_all() {
        let catalog = Catalog::seed();
        assert_eq!(catalog.search("").len(), 8);
        assert_eq!(catalog.search("   ").len(), 8);
    }

    #[test]
    fn test_related_same_category() {
        let catalog = Catalog::seed();
        assert_eq!(ids(&catalog.related(3, 4)), vec![5, 7]);
        assert_eq!(ids(&catalog.related(3, 1)), vec![5]);
        assert!(catalog.related(1, 4).is_empty());
        assert!(catalog.related(999, 4).is_empty());
    }
}
