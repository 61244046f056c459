//! Server-side props for the catalog and product detail pages.

use helix_commerce::catalog::Product;
use helix_commerce::ids::ProductId;
use helix_commerce::search::ProductFilter;
use serde::{Deserialize, Serialize};

use crate::error::SourceError;
use crate::query::ProductQuery;
use crate::source::ProductSource;

/// Which page a resolved URL renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Catalog,
    Detail,
}

impl PageKind {
    /// Any URL mentioning `detail` is a detail page.
    pub fn from_url(resolved_url: Option<&str>) -> Self {
        match resolved_url {
            Some(url) if url.contains("detail") => PageKind::Detail,
            _ => PageKind::Catalog,
        }
    }
}

/// What the page knows about the visitor from the request alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub previous_purchases: Vec<ProductId>,
}

impl UserContext {
    fn from_query(query: &ProductQuery) -> Self {
        Self {
            category: query.user_category().map(str::to_string),
            previous_purchases: Vec::new(),
        }
    }
}

/// Data handed to a page before it renders.
///
/// On the catalog page `products` is the filtered listing; on the detail
/// page it holds the related products.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageProps {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_product: Option<Product>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<ProductFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_context: Option<UserContext>,
}

impl PageProps {
    /// Build props for `resolved_url`. Source failures are logged and
    /// degrade to empty props.
    pub async fn create<S>(source: &S, resolved_url: Option<&str>, query: &ProductQuery) -> Self
    where
        S: ProductSource + ?Sized,
    {
        match PageKind::from_url(resolved_url) {
            PageKind::Detail => Self::detail(source, query).await,
            PageKind::Catalog => Self::catalog(source, query).await,
        }
    }

    /// Filtered listing plus the filters that produced it.
    pub async fn catalog<S>(source: &S, query: &ProductQuery) -> Self
    where
        S: ProductSource + ?Sized,
    {
        let filter = query.to_filter();
        match source.get_products(Some(&filter)).await {
            Ok(products) => Self {
                products,
                selected_product: None,
                filters: Some(filter),
                user_context: Some(UserContext::from_query(query)),
            },
            Err(e) => {
                tracing::warn!(error = %e, "catalog props degraded to empty");
                Self {
                    filters: Some(ProductFilter::default()),
                    ..Self::default()
                }
            }
        }
    }

    /// The requested product and the rest of its category.
    pub async fn detail<S>(source: &S, query: &ProductQuery) -> Self
    where
        S: ProductSource + ?Sized,
    {
        let Some(id) = query.detail_id() else {
            return Self::default();
        };
        match fetch_detail(source, id).await {
            Ok((selected_product, products)) => Self {
                products,
                selected_product,
                filters: None,
                user_context: Some(UserContext::from_query(query)),
            },
            Err(e) => {
                tracing::warn!(error = %e, product_id = id, "detail props degraded to empty");
                Self::default()
            }
        }
    }
}

async fn fetch_detail<S>(
    source: &S,
    id: &str,
) -> Result<(Option<Product>, Vec<Product>), SourceError>
where
    S: ProductSource + ?Sized,
{
    let (product, all) = futures::join!(source.get_product_by_id(id), source.get_products(None));
    let Some(product) = product? else {
        return Ok((None, Vec::new()));
    };
    let related = all?
        .into_iter()
        .filter(|p| p.in_category(&product.category) && p.id != id)
        .collect();
    Ok((Some(product), related))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemorySource;

    fn query(qs: &str) -> ProductQuery {
        ProductQuery::parse(qs)
    }

    #[test]
    fn test_page_kind_from_url() {
        assert_eq!(PageKind::from_url(None), PageKind::Catalog);
        assert_eq!(PageKind::from_url(Some("/products")), PageKind::Catalog);
        assert_eq!(PageKind::from_url(Some("/shop/product-detail")), PageKind::Detail);
        assert_eq!(PageKind::from_url(Some("/detail/prod-001")), PageKind::Detail);
    }

    #[tokio::test]
    async fn test_catalog_props() {
        let source = InMemorySource::sample();
        let props = PageProps::create(
            &source,
            Some("/products"),
            &query("category=Accessories&userCategory=Electronics"),
        )
        .await;

        assert_eq!(props.products.len(), 2);
        assert_eq!(
            props.filters.unwrap().category.as_deref(),
            Some("Accessories")
        );
        assert_eq!(
            props.user_context.unwrap().category.as_deref(),
            Some("Electronics")
        );
        assert!(props.selected_product.is_none());
    }

    #[tokio::test]
    async fn test_detail_props() {
        let source = InMemorySource::sample();
        let props =
            PageProps::create(&source, Some("/product-detail"), &query("slug=prod-004")).await;

        assert_eq!(props.selected_product.unwrap().name, "Laptop Stand");
        let related: Vec<&str> = props.products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(related, vec!["prod-003"]);
    }

    #[tokio::test]
    async fn test_detail_props_without_id_or_match() {
        let source = InMemorySource::sample();
        assert_eq!(
            PageProps::create(&source, Some("/detail"), &query("")).await,
            PageProps::default()
        );

        let props = PageProps::create(&source, Some("/detail"), &query("id=prod-404")).await;
        assert!(props.selected_product.is_none());
        assert!(props.products.is_empty());
    }
}
