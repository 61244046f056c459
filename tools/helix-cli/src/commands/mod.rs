//! CLI command implementations.

pub mod api;
pub mod page;
pub mod products;
pub mod profile;

use clap::{Args, Subcommand};
use helix_commerce::search::ProductFilter;

/// Filter flags shared by listing commands.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only products in this category.
    #[arg(long)]
    pub category: Option<String>,

    /// Lowest price, inclusive.
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Highest price, inclusive.
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Only products in stock.
    #[arg(long)]
    pub in_stock: bool,
}

impl FilterArgs {
    pub fn to_filter(&self) -> ProductFilter {
        ProductFilter {
            category: self.category.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
            in_stock: self.in_stock.then_some(true),
        }
    }
}

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

#[derive(Subcommand)]
pub enum ProductsCommand {
    /// List products matching the filters.
    List(FilterArgs),
    /// Show one product.
    Get {
        /// Product ID.
        id: String,
    },
    /// List distinct categories.
    Categories,
    /// Recommend products.
    Recommend {
        /// Category to recommend from.
        #[arg(long)]
        category: Option<String>,

        /// Maximum number of products.
        #[arg(short, long, default_value_t = 4)]
        limit: usize,

        /// Use the stored profile's category and purchases.
        #[arg(short, long)]
        personal: bool,
    },
}

/// Arguments for the profile command.
#[derive(Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: Option<ProfileCommand>,
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Show the profile and its resolved variant.
    Show,
    /// Set the category of interest.
    Category {
        /// Category name.
        category: String,
    },
    /// Record a purchase.
    Purchase {
        /// Product ID.
        product_id: String,
    },
    /// Forget a purchase.
    Unpurchase {
        /// Product ID.
        product_id: String,
    },
    /// Count a new visit.
    Visit,
    /// Start over with a fresh profile.
    Reset {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the page command.
#[derive(Args)]
pub struct PageArgs {
    /// Page number to show.
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Render the detail page of this product instead of the catalog.
    #[arg(long, conflicts_with_all = ["category", "min_price", "max_price", "in_stock"])]
    pub product: Option<String>,
}

/// Arguments for the api command.
#[derive(Args)]
pub struct ApiArgs {
    /// HTTP method.
    #[arg(short = 'X', long, default_value = "GET")]
    pub method: String,

    /// Query string, e.g. `category=Electronics&inStock=true`.
    #[arg(default_value = "")]
    pub query: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_args_to_filter() {
        let args = FilterArgs {
            category: Some("Accessories".into()),
            max_price: Some(50.0),
            ..FilterArgs::default()
        };
        let filter = args.to_filter();
        assert_eq!(filter.category.as_deref(), Some("Accessories"));
        assert_eq!(filter.max_price, Some(50.0));
        assert_eq!(filter.in_stock, None);
        assert!(FilterArgs::default().to_filter().is_empty());
    }
}
