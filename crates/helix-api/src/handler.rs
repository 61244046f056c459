//! The product read endpoint.

use helix_commerce::catalog::{RecommendationContext, DEFAULT_RECOMMENDATION_LIMIT};
use http::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;

use crate::envelope::{ApiResponse, ProductList};
use crate::error::ApiError;
use crate::query::{Action, ProductQuery};
use crate::source::ProductSource;

/// Status plus JSON body, ready for whatever transport sits in front.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiReply {
    fn ok<T: Serialize>(data: T) -> Result<Self, ApiError> {
        Ok(Self {
            status: StatusCode::OK,
            body: serde_json::to_value(ApiResponse::ok(data))?,
        })
    }

    fn from_error(err: &ApiError) -> Self {
        let envelope = ApiResponse::<()>::error(err.client_message());
        Self {
            status: err.status(),
            // Serializing a unit envelope of strings cannot fail.
            body: serde_json::to_value(envelope).unwrap_or(Value::Null),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// GET-only product endpoint over a [`ProductSource`].
///
/// Requests are served from `?id=`, `?action=categories`,
/// `?action=recommendations` or, failing all of those, a filtered listing.
pub struct ProductApi<S> {
    source: S,
}

impl<S: ProductSource> ProductApi<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Answer one request. Never fails: every error becomes a reply.
    pub async fn handle(&self, method: &Method, query: &str) -> ApiReply {
        match self.try_handle(method, query).await {
            Ok(reply) => reply,
            Err(err) => {
                if err.status().is_server_error() {
                    tracing::error!(error = %err, query, "product endpoint failed");
                } else {
                    tracing::debug!(error = %err, query, "product endpoint rejected request");
                }
                ApiReply::from_error(&err)
            }
        }
    }

    async fn try_handle(&self, method: &Method, query: &str) -> Result<ApiReply, ApiError> {
        if *method != Method::GET {
            return Err(ApiError::MethodNotAllowed);
        }
        let query = ProductQuery::parse(query);

        match query.action() {
            Action::Product(id) => match self.source.get_product_by_id(id).await? {
                Some(product) => ApiReply::ok(product),
                None => Err(ApiError::NotFound(id.to_string())),
            },
            Action::Categories => ApiReply::ok(self.source.get_categories().await?),
            Action::Recommendations { category } => {
                let context = RecommendationContext {
                    category: category.map(str::to_string),
                    previous_purchases: Vec::new(),
                };
                let products = self
                    .source
                    .get_recommendations(Some(&context), DEFAULT_RECOMMENDATION_LIMIT)
                    .await?;
                ApiReply::ok(products)
            }
            Action::List => {
                let filter = query.to_filter();
                let items = self.source.get_products(Some(&filter)).await?;
                tracing::debug!(count = items.len(), "listing products");
                ApiReply::ok(ProductList::new(items, filter))
            }
        }
    }
}
