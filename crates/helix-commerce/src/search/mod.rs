//! Search module.
//!
//! Contains the product filter, pagination, and price facets.

mod filter;
mod results;

pub use filter::{apply_filters, ProductFilter};
pub use results::{clamp_page, Pagination, PriceRange};
