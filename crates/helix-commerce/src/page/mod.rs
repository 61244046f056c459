//! Page models.
//!
//! Framework-free state behind the catalog listing and product detail
//! pages. A renderer reads these; nothing here draws anything.

mod catalog;
mod detail;
mod fields;

pub use catalog::{CatalogPage, CatalogView};
pub use detail::ProductDetail;
pub use fields::{
    parse_flag, parse_items_per_page, CatalogFields, CatalogSettings, TextField,
    DEFAULT_ITEMS_PER_PAGE,
};
