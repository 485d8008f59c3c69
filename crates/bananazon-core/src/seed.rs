//! # Seed Catalog
//!
//! The built-in product list the storefront ships with: eight banana
//! varieties across four categories. Detail-page extras (long copy, reviews,
//! nutrition) are filled in for the two headline products.
//!
//! | id | name                      | category  | price  | rating |
//! |----|---------------------------|-----------|--------|--------|
//! | 1  | Organic Cavendish Bananas | Organic   | $4.99  | 4.8    |
//! | 2  | Red Bananas               | Exotic    | $6.99  | 4.5    |
//! | 3  | Baby Bananas (Manzano)    | Specialty | $7.99  | 4.7    |
//! | 4  | Plantains                 | Cooking   | $5.99  | 4.6    |
//! | 5  | Lady Finger Bananas       | Specialty | $8.99  | 4.9    |
//! | 6  | Blue Java Bananas         | Exotic    | $12.99 | 4.8    |
//! | 7  | Burro Bananas             | Specialty | $7.49  | 4.3    |
//! | 8  | Green Cooking Bananas     | Cooking   | $4.49  | 4.5    |

use chrono::NaiveDate;

use crate::money::Money;
use crate::types::{Nutrition, Product, Review};

/// (id, name, description, price in cents, image, category, rating)
const LISTING: &[(u32, &str, &str, i64, &str, &str, f32)] = &[
    (
        1,
        "Organic Cavendish Bananas",
        "Sweet and creamy classic bananas, perfect for everyday enjoyment.",
        499,
        "/images/cavendish.jpg",
        "Organic",
        4.8,
    ),
    (
        2,
        "Red Bananas",
        "Sweeter than yellow bananas with a hint of raspberry flavor.",
        699,
        "/images/red-banana.jpg",
        "Exotic",
        4.5,
    ),
    (
        3,
        "Baby Bananas (Manzano)",
        "Small, sweet bananas with a slight apple flavor.",
        799,
        "/images/baby-banana.jpg",
        "Specialty",
        4.7,
    ),
    (
        4,
        "Plantains",
        "Starchy cooking bananas, perfect for frying or baking.",
        599,
        "/images/plantain.jpg",
        "Cooking",
        4.6,
    ),
    (
        5,
        "Lady Finger Bananas",
        "Small, sweet bananas with a honey-like flavor.",
        899,
        "/images/lady-finger.jpg",
        "Specialty",
        4.9,
    ),
    (
        6,
        "Blue Java Bananas",
        "Known as \"Ice Cream Bananas\" for their creamy, vanilla custard flavor.",
        1299,
        "/images/blue-java.jpg",
        "Exotic",
        4.8,
    ),
    (
        7,
        "Burro Bananas",
        "Squared-shaped bananas with a lemony flavor.",
        749,
        "/images/burro.jpg",
        "Specialty",
        4.3,
    ),
    (
        8,
        "Green Cooking Bananas",
        "Unripe bananas perfect for savory dishes.",
        449,
        "/images/green-cooking.jpg",
        "Cooking",
        4.5,
    ),
];

/// Returns the seed products in display order.
pub fn products() -> Vec<Product> {
    LISTING
        .iter()
        .map(|&(id, name, description, cents, image, category, rating)| {
            let product = Product::new(
                id,
                name,
                description,
                Money::from_cents(cents),
                image,
                category,
            )
            .with_rating(rating);
            with_details(product)
        })
        .collect()
}

fn with_details(mut product: Product) -> Product {
    match product.id {
        1 => {
            product.long_description = Some(
                "Grown in the fertile soils of Ecuador. Each bunch contains 5-7 bananas \
                 at the perfect stage of ripeness, certified organic and sustainably grown."
                    .to_string(),
            );
            product.reviews = vec![
                review(1, "BananaLover123", 5, "These are the best bananas I've ever had! So sweet and creamy.", (2024, 2, 15)),
                review(2, "FruitFanatic", 4, "Great quality bananas, arrived perfectly ripe.", (2024, 2, 10)),
                review(3, "HealthyEater", 5, "Love that these are organic. Will definitely buy again!", (2024, 1, 28)),
            ];
            product.nutrition = Some(nutrition(105, "1.3g", "0.4g", "27g", "3.1g", "14g"));
            product.origin = Some("Ecuador".to_string());
            product.organic = true;
        }
        2 => {
            product.long_description = Some(
                "A sweeter, exotic variety with subtle hints of raspberry and a striking \
                 reddish-purple skin. Sourced from sustainable farms in Central America."
                    .to_string(),
            );
            product.reviews = vec![
                review(1, "ExoticFruitFan", 5, "Amazing flavor! So much sweeter than regular bananas.", (2024, 2, 18)),
                review(2, "CulinaryExplorer", 4, "Love the raspberry notes. Great in smoothies!", (2024, 2, 5)),
            ];
            product.nutrition = Some(nutrition(90, "1.1g", "0.3g", "22g", "2.8g", "12g"));
            product.origin = Some("Costa Rica".to_string());
        }
        _ => {}
    }
    product
}

fn review(id: u32, user: &str, rating: u8, comment: &str, (y, m, d): (i32, u32, u32)) -> Review {
    Review {
        id,
        user: user.to_string(),
        rating,
        comment: comment.to_string(),
        date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN),
    }
}

fn nutrition(calories: u32, protein: &str, fat: &str, carbs: &str, fiber: &str, sugar: &str) -> Nutrition {
    Nutrition {
        calories,
        protein: protein.to_string(),
        fat: fat.to_string(),
        carbs: carbs.to_string(),
        fiber: fiber.to_string(),
        sugar: sugar.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_are_unique() {
        let products = products();
        let ids: HashSet<_> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), products.len());
        assert_eq!(products.len(), 8);
    }

    #[test]
    fn test_seed_prices_non_negative() {
        assert!(products().iter().all(|p| !p.price.is_negative()));
    }

    #[test]
    fn test_seed_details() {
        let products = products();
        let cavendish = &products[0];
        assert!(cavendish.organic);
        assert_eq!(cavendish.reviews.len(), 3);
        assert_eq!(cavendish.nutrition.as_ref().map(|n| n.calories), Some(105));
        assert_eq!(
            cavendish.reviews[0].date,
            NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()
        );

        let burro = &products[6];
        assert!(burro.reviews.is_empty());
        assert!(burro.nutrition.is_none());
    }
}
