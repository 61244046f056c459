//! JSON response envelope shared by every endpoint reply.

use chrono::{SecondsFormat, Utc};
use helix_commerce::catalog::Product;
use helix_commerce::search::ProductFilter;
use serde::{Deserialize, Serialize};

/// Version stamped into every reply.
pub const API_VERSION: &str = "1.0";

/// `{success, data?, error?, meta}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub meta: Meta,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            meta: Meta::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            meta: Meta::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// RFC 3339, UTC, millisecond precision.
    pub timestamp: String,
    pub version: String,
}

impl Meta {
    pub fn now() -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            version: API_VERSION.to_string(),
        }
    }
}

/// Payload of the filtered listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductList {
    pub items: Vec<Product>,
    pub count: usize,
    /// Omitted when no filter field was supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<ProductFilter>,
}

impl ProductList {
    pub fn new(items: Vec<Product>, filter: ProductFilter) -> Self {
        Self {
            count: items.len(),
            items,
            filters: (!filter.is_empty()).then_some(filter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn test_meta_timestamp_is_rfc3339() {
        let meta = Meta::now();
        assert_eq!(meta.version, "1.0");
        assert!(DateTime::parse_from_rfc3339(&meta.timestamp).is_ok());
        assert!(meta.timestamp.ends_with('Z'));
    }

    #[test]
    fn test_error_envelope_shape() {
        let json = serde_json::to_value(ApiResponse::<()>::error("Method not allowed")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Method not allowed");
        assert!(json.get("data").is_none());
        assert_eq!(json["meta"]["version"], "1.0");
    }

    #[test]
    fn test_product_envelope_deserializes_without_data() {
        let json = serde_json::to_value(ApiResponse::<()>::error("Product with ID x not found"))
            .unwrap();
        let envelope: ApiResponse<Product> = serde_json::from_value(json).unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_product_list_omits_empty_filters() {
        let list = ProductList::new(Vec::new(), ProductFilter::new());
        let json = serde_json::to_value(list).unwrap();
        assert_eq!(json["count"], 0);
        assert!(json.get("filters").is_none());

        let filter = ProductFilter::new().with_in_stock(true);
        let json = serde_json::to_value(ProductList::new(Vec::new(), filter)).unwrap();
        assert_eq!(json["filters"]["inStock"], true);
    }
}
