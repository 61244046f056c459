//! End-to-end checks of the product endpoint over the sample catalog.

use async_trait::async_trait;
use helix_api::{
    ApiResponse, InMemorySource, PageProps, ProductApi, ProductQuery, ProductSource, SourceError,
};
use helix_commerce::catalog::{Product, RecommendationContext};
use helix_commerce::search::ProductFilter;
use http::{Method, StatusCode};
use serde_json::Value;

struct FailingSource;

#[async_trait]
impl ProductSource for FailingSource {
    async fn get_products(
        &self,
        _filter: Option<&ProductFilter>,
    ) -> Result<Vec<Product>, SourceError> {
        Err(SourceError::Unavailable("catalog service down".into()))
    }

    async fn get_product_by_id(&self, _id: &str) -> Result<Option<Product>, SourceError> {
        Err(SourceError::Timeout)
    }

    async fn get_categories(&self) -> Result<Vec<String>, SourceError> {
        Err(SourceError::Unavailable("catalog service down".into()))
    }

    async fn get_recommendations(
        &self,
        _context: Option<&RecommendationContext>,
        _limit: usize,
    ) -> Result<Vec<Product>, SourceError> {
        Err(SourceError::Unavailable("catalog service down".into()))
    }
}

fn api() -> ProductApi<InMemorySource> {
    ProductApi::new(InMemorySource::sample())
}

fn ids(items: &Value) -> Vec<String> {
    items
        .as_array()
        .map(|a| a.iter().filter_map(|p| p["id"].as_str().map(String::from)).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_get_product_by_id() {
    let reply = api().handle(&Method::GET, "id=prod-003").await;
    assert_eq!(reply.status, StatusCode::OK);

    let envelope: ApiResponse<Product> = serde_json::from_value(reply.body).unwrap();
    assert!(envelope.success);
    assert_eq!(envelope.data.unwrap().sku, "UC-001");
    assert_eq!(envelope.meta.version, "1.0");
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let reply = api().handle(&Method::GET, "id=prod-999").await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body["success"], false);
    assert_eq!(reply.body["error"], "Product with ID prod-999 not found");
}

#[tokio::test]
async fn test_id_takes_precedence_over_action() {
    let reply = api().handle(&Method::GET, "action=categories&id=prod-001").await;
    assert_eq!(reply.body["data"]["id"], "prod-001");
}

#[tokio::test]
async fn test_categories() {
    let reply = api().handle(&Method::GET, "?action=categories").await;
    assert_eq!(
        reply.body["data"],
        serde_json::json!(["Accessories", "Electronics"])
    );
}

#[tokio::test]
async fn test_filtered_listing() {
    let reply = api()
        .handle(&Method::GET, "category=Electronics&inStock=true&minPrice=50")
        .await;
    assert_eq!(reply.status, StatusCode::OK);

    let data = &reply.body["data"];
    assert_eq!(ids(&data["items"]), vec!["prod-001"]);
    assert_eq!(data["count"], 1);
    assert_eq!(data["filters"]["category"], "Electronics");
    assert_eq!(data["filters"]["minPrice"], 50.0);
    assert_eq!(data["filters"]["inStock"], true);
    assert!(data["filters"].get("maxPrice").is_none());
}

#[tokio::test]
async fn test_unfiltered_listing_omits_filters() {
    let reply = api().handle(&Method::GET, "minPrice=cheap").await;
    let data = &reply.body["data"];
    assert_eq!(data["count"], 5);
    assert!(data.get("filters").is_none());
}

#[tokio::test]
async fn test_source_failure_is_internal_error() {
    let api = ProductApi::new(FailingSource);
    for query in ["", "id=prod-001", "action=categories", "action=recommendations"] {
        let reply = api.handle(&Method::GET, query).await;
        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR, "query {query:?}");
        assert_eq!(reply.body["error"], "Internal server error");
    }
}

#[tokio::test]
async fn test_method_is_checked_first() {
    let api = ProductApi::new(FailingSource);
    let reply = api.handle(&Method::DELETE, "id=prod-001").await;
    assert_eq!(reply.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_page_props_degrade_on_failure() {
    let query = ProductQuery::parse("category=Electronics&productId=prod-001");

    let catalog = PageProps::create(&FailingSource, Some("/products"), &query).await;
    assert!(catalog.products.is_empty());
    assert_eq!(catalog.filters, Some(ProductFilter::default()));

    let detail = PageProps::create(&FailingSource, Some("/product-detail"), &query).await;
    assert_eq!(detail, PageProps::default());
}

#[tokio::test]
async fn test_concurrent_requests() {
    let api = api();
    let queries = ["id=prod-001", "action=categories", "category=Accessories"];
    let replies =
        futures::future::join_all(queries.iter().map(|q| api.handle(&Method::GET, q))).await;
    assert!(replies.iter().all(|r| r.status == StatusCode::OK));
}
