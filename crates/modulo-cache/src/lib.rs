//! Type-safe key-value persistence for the modular-furniture cart.
//!
//! A [`KeyValueStore`] holds opaque bytes under string keys; [`Cache`] layers
//! JSON serialization on top. Backends:
//!
//! - [`MemoryStore`] - in-process map, shared between clones
//! - [`FileStore`] - one file per key under a directory
//! - `SpinStore` - Spin's Key-Value Store (wasm32 only)
//!
//! # Example
//!
//! ```rust
//! use modulo_cache::{Cache, MemoryStore};
//!
//! let cache = Cache::new(MemoryStore::new());
//! cache.set("cart.v1", &vec![1, 2, 3]).unwrap();
//! let items: Option<Vec<u32>> = cache.get("cart.v1").unwrap();
//! assert_eq!(items, Some(vec![1, 2, 3]));
//! ```

mod backend;
mod error;
mod kv;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
#[cfg(target_arch = "wasm32")]
pub use backend::SpinStore;
pub use error::CacheError;
pub use kv::Cache;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
