//! Product type.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Highest rating a product can carry.
pub const MAX_RATING: f64 = 5.0;

/// A product in the catalog.
///
/// Products are immutable once the catalog is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Description for cards and detail pages.
    pub description: String,
    /// Unit price, never negative.
    pub price: f64,
    /// Category label (e.g. "Electronics").
    pub category: String,
    /// Image path or URL.
    pub image: String,
    /// Average rating, 0 to 5.
    pub rating: f64,
    /// Whether the product can be purchased now.
    pub in_stock: bool,
    /// Stock keeping unit (unique).
    pub sku: String,
}

impl Product {
    /// Check if the product is available for purchase.
    pub fn is_available(&self) -> bool {
        self.in_stock
    }

    /// Split the rating into (full, empty) stars out of five.
    pub fn rating_stars(&self) -> (u8, u8) {
        let full = self.rating.clamp(0.0, MAX_RATING).floor() as u8;
        (full, MAX_RATING as u8 - full)
    }

    /// Price formatted with two decimals, e.g. `$19.99`.
    pub fn display_price(&self) -> String {
        format!("${:.2}", self.price)
    }

    /// Whether this product sits in `category`, ignoring ASCII case.
    pub fn in_category(&self, category: &str) -> bool {
        self.category.eq_ignore_ascii_case(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(rating: f64) -> Product {
        Product {
            id: ProductId::new("prod-x"),
            name: "Thing".into(),
            description: "A thing".into(),
            price: 19.5,
            category: "Accessories".into(),
            image: "/products/thing.jpg".into(),
            rating,
            in_stock: true,
            sku: "TH-001".into(),
        }
    }

    #[test]
    fn test_rating_stars() {
        assert_eq!(product(4.5).rating_stars(), (4, 1));
        assert_eq!(product(5.0).rating_stars(), (5, 0));
        assert_eq!(product(0.0).rating_stars(), (0, 5));
        assert_eq!(product(7.0).rating_stars(), (5, 0));
    }

    #[test]
    fn test_display_price() {
        assert_eq!(product(4.0).display_price(), "$19.50");
    }

    #[test]
    fn test_category_match_ignores_case() {
        let p = product(4.0);
        assert!(p.in_category("accessories"));
        assert!(p.in_category("ACCESSORIES"));
        assert!(!p.in_category("Electronics"));
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(product(4.0)).unwrap();
        assert_eq!(json["inStock"], true);
        assert_eq!(json["id"], "prod-x");
    }
}
