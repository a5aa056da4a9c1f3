//! Key-value cache store backed by a JSON file
//!
//! Provides a `CacheStore` that keeps one serialized value per key in the
//! XDG cache directory, surviving process restarts.

use directories::ProjectDirs;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::config::ReadingListConfig;
use crate::data::OutdatedEntry;

/// Persistent store for the cached reading list
///
/// The value lives in `<cache_dir>/<key>.json` (`~/.cache/mangalag/` on Linux
/// unless a directory is configured).
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// Directory where the cache file is stored
    cache_dir: PathBuf,
    /// Key naming the cache file
    key: String,
}

impl CacheStore {
    /// Creates a store for `key` in the XDG-compliant cache directory
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g., no home directory).
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let cache_dir = default_cache_dir()?;
        Some(Self {
            cache_dir,
            key: key.into(),
        })
    }

    /// Creates a store with a custom cache directory
    pub fn with_dir(cache_dir: PathBuf, key: impl Into<String>) -> Self {
        Self {
            cache_dir,
            key: key.into(),
        }
    }

    /// Builds the store described by `config`, falling back to the XDG directory
    pub fn from_config(config: &ReadingListConfig) -> Option<Self> {
        match &config.cache_dir {
            Some(dir) => Some(Self::with_dir(dir.clone(), config.cache_key.clone())),
            None => Self::new(config.cache_key.clone()),
        }
    }

    /// Path of the file backing this store
    pub fn path(&self) -> PathBuf {
        self.cache_dir.join(format!("{}.json", self.key))
    }

    /// Reads the raw cached value, if any
    pub fn load(&self) -> Option<String> {
        fs::read_to_string(self.path()).ok()
    }

    /// Replaces the cached value, creating the cache directory if needed
    ///
    /// The value is written to `<key>.json.tmp` and renamed into place, so an
    /// interrupted write never replaces the previous value with a partial one.
    pub fn save(&self, serialized: &str) -> io::Result<()> {
        fs::create_dir_all(&self.cache_dir)?;
        let path = self.path();
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serialized)?;
        fs::rename(&tmp, &path)
    }

    /// Removes the cached value. Clearing an empty cache is not an error.
    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(self.path()) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }

    /// Loads and decodes the cached reading list
    ///
    /// A value that does not decode as a list of entries is treated as an
    /// empty cache rather than an error.
    pub fn load_entries(&self) -> Option<Vec<OutdatedEntry>> {
        let content = self.load()?;
        match serde_json::from_str(&content) {
            Ok(entries) => Some(entries),
            Err(e) => {
                warn!(path = %self.path().display(), error = %e, "ignoring unreadable reading list cache");
                None
            }
        }
    }

    /// Serializes and stores the reading list
    pub fn save_entries(&self, entries: &[OutdatedEntry]) -> io::Result<()> {
        let json = serde_json::to_string(entries)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.save(&json)?;
        debug!(count = entries.len(), path = %self.path().display(), "saved reading list cache");
        Ok(())
    }
}

/// XDG cache directory for the application, e.g. `~/.cache/mangalag`
pub fn default_cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "mangalag").map(|dirs| dirs.cache_dir().to_path_buf())
}
