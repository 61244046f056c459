//! Catalog page controller: live filters and paging over a fetched list.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::catalog::Product;
use crate::page::CatalogSettings;
use crate::search::{apply_filters, clamp_page, Pagination, PriceRange, ProductFilter};

/// Filter and page state for one catalog listing.
///
/// All work happens on the list handed in at construction; interactions
/// never refetch. Any filter change sends the visitor back to page 1.
#[derive(Debug, Clone)]
pub struct CatalogPage {
    products: Vec<Product>,
    settings: CatalogSettings,
    filters: ProductFilter,
    current_page: usize,
}

/// Everything a renderer needs to draw the current state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView<'a> {
    pub heading: &'a str,
    pub description: &'a str,
    pub show_filters: bool,
    pub show_ratings: bool,
    pub filters: &'a ProductFilter,
    pub categories: Vec<String>,
    pub price_range: PriceRange,
    pub pagination: Pagination,
    pub items: Vec<&'a Product>,
}

impl CatalogPage {
    pub fn new(products: Vec<Product>, settings: CatalogSettings) -> Self {
        Self {
            products,
            settings,
            filters: ProductFilter::default(),
            current_page: 1,
        }
    }

    pub fn settings(&self) -> &CatalogSettings {
        &self.settings
    }

    pub fn filters(&self) -> &ProductFilter {
        &self.filters
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// The unfiltered list.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Products passing the active filters, in list order.
    pub fn filtered(&self) -> Vec<&Product> {
        apply_filters(&self.products, &self.filters)
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(
            self.current_page,
            self.settings.items_per_page,
            self.filtered().len(),
        )
    }

    /// The slice of filtered products on the current page.
    pub fn page_items(&self) -> Vec<&Product> {
        let filtered = self.filtered();
        let pagination = Pagination::new(
            self.current_page,
            self.settings.items_per_page,
            filtered.len(),
        );
        pagination.slice(&filtered).to_vec()
    }

    /// Distinct categories of the unfiltered list, sorted.
    ///
    /// Drawn from the full list so narrowing never hides an option.
    pub fn categories(&self) -> Vec<String> {
        self.products
            .iter()
            .map(|p| p.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Price bounds of the unfiltered list.
    pub fn price_range(&self) -> PriceRange {
        PriceRange::from_prices(self.products.iter().map(|p| p.price))
    }

    /// Replace every filter at once.
    pub fn set_filters(&mut self, filters: ProductFilter) {
        self.filters = filters;
        self.current_page = 1;
    }

    /// Select `category`, or clear it if it is already selected.
    pub fn toggle_category(&mut self, category: &str) {
        let selected = self
            .filters
            .category
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case(category));
        self.filters.category = if selected {
            None
        } else {
            Some(category.to_string())
        };
        self.current_page = 1;
    }

    pub fn set_price_range(&mut self, min: Option<f64>, max: Option<f64>) {
        self.filters.min_price = min;
        self.filters.max_price = max;
        self.current_page = 1;
    }

    /// Flip between "in stock only" and no stock constraint.
    pub fn toggle_in_stock(&mut self) {
        self.filters.in_stock = match self.filters.in_stock {
            Some(true) => None,
            _ => Some(true),
        };
        self.current_page = 1;
    }

    pub fn clear_filters(&mut self) {
        self.set_filters(ProductFilter::default());
    }

    /// Jump to `page`, clamped into range. Returns the page landed on.
    pub fn go_to_page(&mut self, page: usize) -> usize {
        let total_pages = self.pagination().total_pages;
        self.current_page = clamp_page(page, total_pages);
        self.current_page
    }

    pub fn next_page(&mut self) -> usize {
        self.go_to_page(self.current_page.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> usize {
        self.go_to_page(self.current_page.saturating_sub(1))
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> CatalogView<'_> {
        CatalogView {
            heading: &self.settings.heading,
            description: &self.settings.description,
            show_filters: self.settings.show_filters,
            show_ratings: self.settings.show_ratings,
            filters: &self.filters,
            categories: self.categories(),
            price_range: self.price_range(),
            pagination: self.pagination(),
            items: self.page_items(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductCatalog;
    use crate::ids::ProductId;

    fn settings(per_page: usize) -> CatalogSettings {
        CatalogSettings {
            items_per_page: per_page,
            ..CatalogSettings::default()
        }
    }

    fn sample_page(per_page: usize) -> CatalogPage {
        CatalogPage::new(ProductCatalog::sample().all().to_vec(), settings(per_page))
    }

    fn many_products(n: usize) -> Vec<Product> {
        let template = ProductCatalog::sample().all()[0].clone();
        (0..n)
            .map(|i| Product {
                id: ProductId::new(format!("prod-{i:03}")),
                sku: format!("SKU-{i}"),
                price: 10.0 + i as f64,
                ..template.clone()
            })
            .collect()
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_single_page_controls_are_inert() {
        let mut page = sample_page(6);
        let pagination = page.pagination();
        assert_eq!(pagination.total_pages, 1);
        assert!(!pagination.shows_controls());

        assert_eq!(page.next_page(), 1);
        assert_eq!(page.prev_page(), 1);
        assert_eq!(page.page_items().len(), 5);
    }

    #[test]
    fn test_navigation_clamps() {
        let mut page = CatalogPage::new(many_products(14), settings(6));
        assert_eq!(page.pagination().total_pages, 3);

        assert_eq!(page.go_to_page(99), 3);
        assert_eq!(page.page_items().len(), 2);
        assert_eq!(page.next_page(), 3);
        assert_eq!(page.go_to_page(0), 1);
        assert_eq!(page.prev_page(), 1);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut page = CatalogPage::new(many_products(14), settings(6));
        page.go_to_page(2);
        page.set_price_range(Some(15.0), None);
        assert_eq!(page.current_page(), 1);

        page.go_to_page(2);
        page.toggle_in_stock();
        assert_eq!(page.current_page(), 1);

        page.go_to_page(2);
        page.toggle_category("Electronics");
        assert_eq!(page.current_page(), 1);
    }

    #[test]
    fn test_toggle_category() {
        let mut page = sample_page(6);
        page.toggle_category("Accessories");
        assert_eq!(ids(&page.filtered()), vec!["prod-003", "prod-004"]);

        page.toggle_category("Accessories");
        assert!(page.filters().category.is_none());
        assert_eq!(page.filtered().len(), 5);
    }

    #[test]
    fn test_toggle_in_stock() {
        let mut page = sample_page(6);
        page.toggle_in_stock();
        assert_eq!(page.filters().in_stock, Some(true));
        assert_eq!(page.filtered().len(), 4);

        page.toggle_in_stock();
        assert_eq!(page.filters().in_stock, None);
    }

    #[test]
    fn test_facets_ignore_active_filters() {
        let mut page = sample_page(6);
        page.toggle_category("Accessories");
        page.set_price_range(Some(0.0), Some(20.0));

        assert_eq!(page.categories(), vec!["Accessories", "Electronics"]);
        assert_eq!(page.price_range(), PriceRange { min: 19.0, max: 200.0 });
        assert_eq!(ids(&page.filtered()), vec!["prod-003"]);
    }

    #[test]
    fn test_empty_list() {
        let mut page = CatalogPage::new(Vec::new(), settings(6));
        assert_eq!(page.price_range(), PriceRange::FALLBACK);
        assert!(page.categories().is_empty());
        assert_eq!(page.pagination().total_pages, 0);
        assert_eq!(page.next_page(), 1);
        assert!(page.page_items().is_empty());
    }

    #[test]
    fn test_clear_filters() {
        let mut page = sample_page(2);
        page.toggle_in_stock();
        page.go_to_page(2);
        page.clear_filters();
        assert!(page.filters().is_empty());
        assert_eq!(page.current_page(), 1);
        assert_eq!(page.pagination().total_pages, 3);
    }

    #[test]
    fn test_view_snapshot() {
        let mut page = sample_page(2);
        page.go_to_page(2);
        let view = page.view();
        assert_eq!(ids(&view.items), vec!["prod-003", "prod-004"]);
        assert_eq!(view.pagination.page, 2);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["pagination"]["totalPages"], 3);
        assert_eq!(json["priceRange"]["max"], 200.0);
    }
}
