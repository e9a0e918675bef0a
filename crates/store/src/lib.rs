//! Entity store contract and the client-side normalized cache.
//!
//! The remote store is the only source of truth. [`EntityStore`] is the
//! request/response contract the mutation controller consumes; [`MemoryStore`]
//! implements it in-process for tests and the CLI. [`NormalizedCache`] mirrors
//! the last-known server state per entity id.

pub mod cache;
pub mod contract;
pub mod error;
pub mod memory;

pub use cache::{NormalizedCache, SharedCache};
pub use contract::{Collection, EntityStore};
pub use error::{ErrorClass, Result, StoreError};
pub use memory::MemoryStore;
