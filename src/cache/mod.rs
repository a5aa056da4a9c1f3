//! Cache module for persisting the derived reading list to disk
//!
//! The cache holds a single string value (the JSON-encoded list of outdated
//! entries) under a fixed key. There is no expiry and no versioning: the value
//! is replaced wholesale on each successful refresh and read back as-is.

mod store;

pub use store::{default_cache_dir, CacheStore};
