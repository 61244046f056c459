//! Product read endpoint for the Helix storefront.
//!
//! A transport-agnostic JSON endpoint over an async [`ProductSource`],
//! plus the props factory the catalog and detail pages load from.
//!
//! # Example
//!
//! ```rust,no_run
//! use helix_api::{InMemorySource, ProductApi};
//! use http::Method;
//!
//! # async fn run() {
//! let api = ProductApi::new(InMemorySource::sample());
//! let reply = api.handle(&Method::GET, "category=Electronics&inStock=true").await;
//! assert!(reply.is_success());
//! println!("{}", reply.body);
//! # }
//! ```

mod envelope;
mod error;
mod handler;
mod props;
mod query;
mod source;

pub use envelope::{ApiResponse, Meta, ProductList, API_VERSION};
pub use error::{ApiError, SourceError};
pub use handler::{ApiReply, ProductApi};
pub use props::{PageKind, PageProps, UserContext};
pub use query::{Action, ProductQuery};
pub use source::{InMemorySource, Latency, ProductSource};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        ApiError, ApiReply, ApiResponse, InMemorySource, PageProps, ProductApi, ProductQuery,
        ProductSource, SourceError,
    };
}
