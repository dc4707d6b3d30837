//! Cache revalidation module
//!
//! Notifies the page-rendering frontend that cached routes are stale.

mod cache_invalidator;

pub use cache_invalidator::{from_config, CacheInvalidator};
