//! Query-string parsing for the product endpoint and page props.

use helix_commerce::search::ProductFilter;

/// Raw query parameters, as strings.
///
/// Every field is optional and unknown keys are ignored. A repeated key
/// keeps its first value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub id: Option<String>,
    pub action: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub in_stock: Option<String>,
    pub product_id: Option<String>,
    pub slug: Option<String>,
    pub user_category: Option<String>,
}

/// What a request asks the endpoint to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action<'a> {
    Product(&'a str),
    Categories,
    Recommendations { category: Option<&'a str> },
    List,
}

impl ProductQuery {
    /// Parse a query string, with or without a leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query).unwrap_or_else(|e| {
            tracing::debug!(error = %e, query, "undecodable query string, using defaults");
            Vec::new()
        });

        let mut parsed = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "id" => &mut parsed.id,
                "action" => &mut parsed.action,
                "category" => &mut parsed.category,
                "minPrice" => &mut parsed.min_price,
                "maxPrice" => &mut parsed.max_price,
                "inStock" => &mut parsed.in_stock,
                "productId" => &mut parsed.product_id,
                "slug" => &mut parsed.slug,
                "userCategory" => &mut parsed.user_category,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        parsed
    }

    /// Dispatch in precedence order: id, categories, recommendations, list.
    pub fn action(&self) -> Action<'_> {
        if let Some(id) = non_empty(&self.id) {
            return Action::Product(id);
        }
        match self.action.as_deref() {
            Some("categories") => Action::Categories,
            Some("recommendations") => Action::Recommendations {
                category: non_empty(&self.category),
            },
            _ => Action::List,
        }
    }

    /// The listing filter. Unparseable prices are dropped and `inStock`
    /// only counts when it is exactly `"true"`.
    pub fn to_filter(&self) -> ProductFilter {
        ProductFilter {
            category: non_empty(&self.category).map(str::to_string),
            min_price: parse_price(&self.min_price),
            max_price: parse_price(&self.max_price),
            in_stock: (self.in_stock.as_deref() == Some("true")).then_some(true),
        }
    }

    /// Product id for detail pages: `productId`, then `id`, then `slug`.
    pub fn detail_id(&self) -> Option<&str> {
        non_empty(&self.product_id)
            .or_else(|| non_empty(&self.id))
            .or_else(|| non_empty(&self.slug))
    }

    pub fn user_category(&self) -> Option<&str> {
        non_empty(&self.user_category)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn parse_price(value: &Option<String>) -> Option<f64> {
    value
        .as_deref()
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|p| p.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decodes_values() {
        let q = ProductQuery::parse("?category=Home%20Office&minPrice=10&utm_source=x");
        assert_eq!(q.category.as_deref(), Some("Home Office"));
        assert_eq!(q.min_price.as_deref(), Some("10"));
        assert_eq!(ProductQuery::parse(""), ProductQuery::default());
    }

    #[test]
    fn test_action_precedence() {
        let q = ProductQuery::parse("id=prod-001&action=categories");
        assert_eq!(q.action(), Action::Product("prod-001"));

        let q = ProductQuery::parse("action=categories&category=Electronics");
        assert_eq!(q.action(), Action::Categories);

        let q = ProductQuery::parse("action=recommendations&category=Accessories");
        assert_eq!(
            q.action(),
            Action::Recommendations {
                category: Some("Accessories")
            }
        );

        let q = ProductQuery::parse("id=&action=bogus");
        assert_eq!(q.action(), Action::List);
    }

    #[test]
    fn test_filter_ignores_bad_numbers() {
        let q = ProductQuery::parse("minPrice=abc&maxPrice=99.5&inStock=yes");
        let filter = q.to_filter();
        assert_eq!(filter.min_price, None);
        assert_eq!(filter.max_price, Some(99.5));
        assert_eq!(filter.in_stock, None);
        assert!(ProductQuery::parse("minPrice=NaN").to_filter().is_empty());
    }

    #[test]
    fn test_filter_in_stock_only_when_true() {
        let q = ProductQuery::parse("inStock=true");
        assert_eq!(q.to_filter().in_stock, Some(true));
        let q = ProductQuery::parse("inStock=false");
        assert!(q.to_filter().is_empty());
    }

    #[test]
    fn test_detail_id_order() {
        let q = ProductQuery::parse("slug=s&id=i&productId=p");
        assert_eq!(q.detail_id(), Some("p"));
        let q = ProductQuery::parse("slug=s&id=i");
        assert_eq!(q.detail_id(), Some("i"));
        let q = ProductQuery::parse("slug=s");
        assert_eq!(q.detail_id(), Some("s"));
        assert_eq!(ProductQuery::default().detail_id(), None);
    }

    #[test]
    fn test_repeated_key_keeps_first_value() {
        let q = ProductQuery::parse("id=a&id=b&category=Electronics&category=Accessories");
        assert_eq!(q.id.as_deref(), Some("a"));
        assert_eq!(q.category.as_deref(), Some("Electronics"));

        let q = ProductQuery::parse("minPrice=10&minPrice=500&inStock=true&inStock=false");
        assert_eq!(q.to_filter().min_price, Some(10.0));
        assert_eq!(q.to_filter().in_stock, Some(true));
    }
}
