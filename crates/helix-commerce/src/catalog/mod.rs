//! Product catalog module.
//!
//! Contains the product type and the in-memory catalog queries.

mod product;
mod service;

pub use product::{Product, MAX_RATING};
pub use service::{ProductCatalog, RecommendationContext, DEFAULT_RECOMMENDATION_LIMIT};
