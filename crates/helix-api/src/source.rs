//! Async product source boundary.

use std::time::Duration;

use async_trait::async_trait;
use helix_commerce::catalog::{Product, ProductCatalog, RecommendationContext};
use helix_commerce::search::ProductFilter;

use crate::error::SourceError;

/// Where product data comes from.
///
/// Results are owned so implementations can sit behind a network hop.
#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn get_products(
        &self,
        filter: Option<&ProductFilter>,
    ) -> Result<Vec<Product>, SourceError>;

    async fn get_product_by_id(&self, id: &str) -> Result<Option<Product>, SourceError>;

    async fn get_categories(&self) -> Result<Vec<String>, SourceError>;

    async fn get_recommendations(
        &self,
        context: Option<&RecommendationContext>,
        limit: usize,
    ) -> Result<Vec<Product>, SourceError>;
}

/// Simulated fetch delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    /// Applied to listing queries.
    pub list: Duration,
    /// Applied to single-product lookups.
    pub single: Duration,
}

impl Latency {
    pub const NONE: Latency = Latency {
        list: Duration::ZERO,
        single: Duration::ZERO,
    };

    /// The same delay for every call.
    pub fn uniform(delay: Duration) -> Self {
        Self {
            list: delay,
            single: delay,
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            list: Duration::from_millis(300),
            single: Duration::from_millis(200),
        }
    }
}

/// A [`ProductCatalog`] served with artificial latency.
///
/// Category and recommendation calls answer immediately.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    catalog: ProductCatalog,
    latency: Latency,
}

impl InMemorySource {
    pub fn new(catalog: ProductCatalog) -> Self {
        Self {
            catalog,
            latency: Latency::default(),
        }
    }

    /// The sample catalog with no delay.
    pub fn sample() -> Self {
        Self::new(ProductCatalog::sample()).with_latency(Latency::NONE)
    }

    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    pub fn latency(&self) -> Latency {
        self.latency
    }
}

async fn delay(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

#[async_trait]
impl ProductSource for InMemorySource {
    async fn get_products(
        &self,
        filter: Option<&ProductFilter>,
    ) -> Result<Vec<Product>, SourceError> {
        delay(self.latency.list).await;
        Ok(self.catalog.get_products(filter).into_iter().cloned().collect())
    }

    async fn get_product_by_id(&self, id: &str) -> Result<Option<Product>, SourceError> {
        delay(self.latency.single).await;
        Ok(self.catalog.get_product_by_id(id).cloned())
    }

    async fn get_categories(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.catalog.get_categories())
    }

    async fn get_recommendations(
        &self,
        context: Option<&RecommendationContext>,
        limit: usize,
    ) -> Result<Vec<Product>, SourceError> {
        Ok(self
            .catalog
            .get_recommendations(context, limit)
            .into_iter()
            .cloned()
            .collect())
    }
}
