//! Storefront domain types and logic for Helix.
//!
//! - **Catalog**: products and the static catalog queries
//! - **Search**: filters, pagination, price facets
//! - **Page**: catalog listing controller and product detail model
//! - **Personalization**: visitor profile, rule table, variant resolution
//!
//! # Example
//!
//! ```rust
//! use helix_commerce::prelude::*;
//!
//! let catalog = ProductCatalog::sample();
//! let filter = ProductFilter::new().with_category("Accessories");
//! let accessories = catalog.get_products(Some(&filter));
//! assert_eq!(accessories.len(), 2);
//!
//! let mut page = CatalogPage::new(
//!     catalog.all().to_vec(),
//!     CatalogSettings::default(),
//! );
//! page.toggle_in_stock();
//! assert_eq!(page.pagination().total, 4);
//! ```

pub mod error;
pub mod ids;

pub mod catalog;
pub mod page;
pub mod personalization;
pub mod search;

pub use error::CommerceError;
pub use ids::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;

    // Catalog
    pub use crate::catalog::{Product, ProductCatalog, RecommendationContext};

    // Search
    pub use crate::search::{Pagination, PriceRange, ProductFilter};

    // Pages
    pub use crate::page::{CatalogFields, CatalogPage, CatalogSettings, ProductDetail};

    // Personalization
    pub use crate::personalization::{
        PersonalizationProfile, PersonalizationResolver, PersonalizationRule, RuleCondition,
        RuleSet, Variant,
    };
}
