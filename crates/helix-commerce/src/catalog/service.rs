//! In-memory product catalog queries.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::search::ProductFilter;

/// Default number of recommendations returned.
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 4;

/// What the caller knows about the visitor when asking for recommendations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub previous_purchases: Vec<ProductId>,
}

impl RecommendationContext {
    /// Context restricted to one category, with no purchase history.
    pub fn for_category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            previous_purchases: Vec::new(),
        }
    }
}

/// A static, read-only product list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    /// Build a catalog, rejecting duplicate ids or SKUs and bad numbers.
    pub fn new(products: Vec<Product>) -> Result<Self, CommerceError> {
        let mut ids = HashSet::new();
        let mut skus = HashSet::new();
        for product in &products {
            if !ids.insert(product.id.as_str()) {
                return Err(CommerceError::InvalidCatalog(format!(
                    "duplicate product id {}",
                    product.id
                )));
            }
            if !skus.insert(product.sku.as_str()) {
                return Err(CommerceError::InvalidCatalog(format!(
                    "duplicate sku {}",
                    product.sku
                )));
            }
            if !product.price.is_finite() || product.price < 0.0 {
                return Err(CommerceError::InvalidCatalog(format!(
                    "{} has price {} that is not a finite non-negative number",
                    product.id, product.price
                )));
            }
            if !(0.0..=5.0).contains(&product.rating) {
                return Err(CommerceError::InvalidCatalog(format!(
                    "{} has rating {} outside 0-5",
                    product.id, product.rating
                )));
            }
        }
        Ok(Self { products })
    }

    /// Parse a JSON array of products.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// The fixed five-item sample catalog.
    pub fn sample() -> Self {
        Self {
            products: sample_products(),
        }
    }

    /// Every product, in catalog order.
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products matching every present field of `filter`, in catalog order.
    pub fn get_products(&self, filter: Option<&ProductFilter>) -> Vec<&Product> {
        let result: Vec<&Product> = match filter {
            Some(filter) => self.products.iter().filter(|p| filter.matches(p)).collect(),
            None => self.products.iter().collect(),
        };
        tracing::debug!(count = result.len(), ?filter, "catalog query");
        result
    }

    /// Look up one product; `None` when the id is unknown.
    pub fn get_product_by_id(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Distinct categories, sorted ascending.
    pub fn get_categories(&self) -> Vec<String> {
        self.products
            .iter()
            .map(|p| p.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Filter by the visitor's category, drop anything already bought, and
    /// keep the first `limit` in catalog order. No ranking, no padding.
    pub fn get_recommendations(
        &self,
        context: Option<&RecommendationContext>,
        limit: usize,
    ) -> Vec<&Product> {
        let category = context
            .and_then(|c| c.category.as_deref())
            .filter(|c| !c.is_empty());
        let purchased: &[ProductId] = context.map_or(&[], |c| c.previous_purchases.as_slice());

        self.products
            .iter()
            .filter(|p| category.map_or(true, |c| p.in_category(c)))
            .filter(|p| !purchased.contains(&p.id))
            .take(limit)
            .collect()
    }
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    description: &str,
    price: f64,
    category: &str,
    image: &str,
    rating: f64,
    in_stock: bool,
    sku: &str,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        price,
        category: category.to_string(),
        image: image.to_string(),
        rating,
        in_stock,
        sku: sku.to_string(),
    }
}

fn sample_products() -> Vec<Product> {
    vec![
        product(
            "prod-001",
            "Premium Headphones",
            "High-quality wireless headphones with noise cancellation",
            199.99,
            "Electronics",
            "/products/headphones.jpg",
            4.5,
            true,
            "HP-001",
        ),
        product(
            "prod-002",
            "Wireless Mouse",
            "Ergonomic wireless mouse with precision tracking",
            49.99,
            "Electronics",
            "/products/mouse.jpg",
            4.2,
            true,
            "WM-001",
        ),
        product(
            "prod-003",
            "USB-C Cable",
            "Fast charging USB-C cable, 6ft length",
            19.99,
            "Accessories",
            "/products/usb-c.jpg",
            4.8,
            true,
            "UC-001",
        ),
        product(
            "prod-004",
            "Laptop Stand",
            "Adjustable aluminum laptop stand for ergonomic workspace",
            79.99,
            "Accessories",
            "/products/laptop-stand.jpg",
            4.6,
            true,
            "LS-001",
        ),
        product(
            "prod-005",
            "Mechanical Keyboard",
            "RGB mechanical keyboard with customizable switches",
            149.99,
            "Electronics",
            "/products/keyboard.jpg",
            4.7,
            false,
            "MK-001",
        ),
    ]
}
