//! Type-safe key-value persistence port for the Helix storefront.
//!
//! The storefront keeps small pieces of client state (the personalization
//! profile, for one) in a durable keyed store. This crate provides the port
//! those callers depend on, plus the stores that back it:
//!
//! - [`MemoryStore`]: process-local map, used by tests and short-lived sessions
//! - [`FileStore`]: one JSON document per key on disk
//! - [`UnavailableStore`]: a store that is not there; reads miss, writes vanish
//!
//! # Example
//!
//! ```rust
//! use helix_cache::Cache;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Prefs {
//!     theme: String,
//! }
//!
//! let cache = Cache::in_memory();
//! cache.set("prefs", &Prefs { theme: "dark".into() }).unwrap();
//!
//! let prefs: Option<Prefs> = cache.get("prefs").unwrap();
//! assert_eq!(prefs.unwrap().theme, "dark");
//! ```

mod error;
mod file;
mod kv;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, KeyValueStore, MemoryStore, UnavailableStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore, UnavailableStore};
}
