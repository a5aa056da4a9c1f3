//! Runtime configuration for the reading-list pipeline
//!
//! Everything the client and cache need to know (endpoint, user, cache key and
//! location) is carried in one struct that is handed to `ReadingList::new`,
//! so tests can point the pipeline at a local mock server and a temp dir.

use std::path::PathBuf;

/// Default base URL of the aggregation API
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default key the derived list is persisted under
pub const DEFAULT_CACHE_KEY: &str = "readingListCache";

/// Configuration injected into the reading-list pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingListConfig {
    /// Base URL of the aggregation API, without trailing slash
    pub base_url: String,
    /// User whose reading list is fetched
    pub username: String,
    /// Key (file stem) the derived list is cached under
    pub cache_key: String,
    /// Directory for the cache file; `None` uses the XDG cache directory
    pub cache_dir: Option<PathBuf>,
}

impl ReadingListConfig {
    /// Creates a config for `username` with default endpoint and cache settings
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            username: username.into(),
            cache_key: DEFAULT_CACHE_KEY.to_string(),
            cache_dir: None,
        }
    }

    /// Overrides the API base URL. A trailing `/` is dropped.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Overrides the cache directory
    pub fn with_cache_dir(mut self, cache_dir: PathBuf) -> Self {
        self.cache_dir = Some(cache_dir);
        self
    }

    /// Overrides the cache key
    pub fn with_cache_key(mut self, cache_key: impl Into<String>) -> Self {
        self.cache_key = cache_key.into();
        self
    }
}
