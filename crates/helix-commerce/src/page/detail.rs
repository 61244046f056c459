//! Product detail page model.

use serde::Serialize;

use crate::catalog::{Product, ProductCatalog, RecommendationContext};
use crate::personalization::PersonalizationProfile;

/// A product plus the other products shown alongside it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail<'a> {
    pub product: &'a Product,
    /// Same category, excluding the product itself.
    pub related: Vec<&'a Product>,
}

impl<'a> ProductDetail<'a> {
    /// `None` when `id` is not in the catalog.
    pub fn build(catalog: &'a ProductCatalog, id: &str) -> Option<Self> {
        let product = catalog.get_product_by_id(id)?;
        let related = catalog
            .all()
            .iter()
            .filter(|p| p.in_category(&product.category) && p.id != product.id)
            .collect();
        Some(Self { product, related })
    }

    /// Recommendations for this visitor on this page.
    ///
    /// Uses the visitor's category (or this product's when none is known or
    /// it is empty)
    /// and purchase history, then drops the product being viewed. The drop
    /// happens after truncation, so fewer than `limit` may come back.
    pub fn personalized_recommendations(
        &self,
        catalog: &'a ProductCatalog,
        profile: &PersonalizationProfile,
        limit: usize,
    ) -> Vec<&'a Product> {
        let context = RecommendationContext {
            category: Some(
                profile
                    .category
                    .clone()
                    .filter(|c| !c.is_empty())
                    .unwrap_or_else(|| self.product.category.clone()),
            ),
            previous_purchases: profile.previous_purchases.clone(),
        };
        catalog
            .get_recommendations(Some(&context), limit)
            .into_iter()
            .filter(|p| p.id != self.product.id)
            .collect()
    }
}
