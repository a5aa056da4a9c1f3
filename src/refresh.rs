//! Reading-list refresh orchestration
//!
//! `ReadingList` owns the in-memory list together with the client and cache
//! that feed it. Refreshing takes `&mut self`, so one instance can never run
//! two refreshes at once; the UI moves the instance into a background task for
//! the duration of a refresh and gets it back in a `RefreshMessage`.

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::cache::CacheStore;
use crate::config::ReadingListConfig;
use crate::data::{derive, FetchError, OutdatedEntry, ReadingListClient};

/// Sent from a background refresh task back to the UI
#[derive(Debug)]
pub enum RefreshMessage {
    /// The refresh finished; the list is handed back with the fetch result
    Completed {
        list: ReadingList,
        result: Result<usize, FetchError>,
    },
}

/// The user's list of titles with unread chapters
#[derive(Debug)]
pub struct ReadingList {
    client: ReadingListClient,
    cache: Option<CacheStore>,
    entries: Vec<OutdatedEntry>,
    last_refresh: Option<DateTime<Local>>,
}

impl ReadingList {
    /// Creates an empty list wired to the client and cache described by `config`
    pub fn new(config: &ReadingListConfig) -> Self {
        let cache = CacheStore::from_config(config);
        if cache.is_none() {
            warn!("no cache directory available, reading list will not be persisted");
        }
        Self::with_parts(ReadingListClient::new(config), cache)
    }

    /// Creates an empty list from an explicit client and cache
    pub fn with_parts(client: ReadingListClient, cache: Option<CacheStore>) -> Self {
        Self {
            client,
            cache,
            entries: Vec::new(),
            last_refresh: None,
        }
    }

    /// Current entries, sorted by chapters left
    pub fn entries(&self) -> &[OutdatedEntry] {
        &self.entries
    }

    /// When the list was last replaced by a successful fetch in this process
    pub fn last_refresh(&self) -> Option<DateTime<Local>> {
        self.last_refresh
    }

    /// Replaces the in-memory list with the cached one
    ///
    /// A missing or unreadable cache yields an empty list.
    pub fn load_cache(&mut self) -> &[OutdatedEntry] {
        self.entries = self
            .cache
            .as_ref()
            .and_then(CacheStore::load_entries)
            .unwrap_or_default();
        debug!(count = self.entries.len(), "loaded reading list from cache");
        &self.entries
    }

    /// Fetches, derives and persists a fresh list
    ///
    /// With `force_clear`, the cache and the in-memory list are emptied before
    /// fetching, so a failed fetch leaves the list empty. Otherwise a failed
    /// fetch leaves the previous list untouched.
    ///
    /// # Returns
    /// * `Ok(&[OutdatedEntry])` - The new list, already written to the cache
    /// * `Err(FetchError)` - The fetch failed; `entries()` still holds the prior list
    pub async fn try_refresh(&mut self, force_clear: bool) -> Result<&[OutdatedEntry], FetchError> {
        if force_clear {
            self.clear();
        }

        let raw = self.client.fetch().await?;
        self.entries = derive(&raw);
        self.last_refresh = Some(Local::now());

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.save_entries(&self.entries) {
                warn!(path = %cache.path().display(), error = %e, "failed to write reading list cache");
            }
        }

        info!(count = self.entries.len(), "reading list refreshed");
        Ok(&self.entries)
    }

    /// Like `try_refresh`, but logs a failed fetch and returns the kept list
    pub async fn refresh(&mut self, force_clear: bool) -> &[OutdatedEntry] {
        if let Err(e) = self.try_refresh(force_clear).await {
            warn!(error = %e, "reading list refresh failed, keeping previous list");
        }
        &self.entries
    }

    /// Runs `try_refresh` and packages the outcome for the UI's channel
    pub async fn refresh_into_message(mut self, force_clear: bool) -> RefreshMessage {
        let result = match self.try_refresh(force_clear).await {
            Ok(entries) => Ok(entries.len()),
            Err(e) => {
                warn!(error = %e, "reading list refresh failed, keeping previous list");
                Err(e)
            }
        };
        RefreshMessage::Completed { list: self, result }
    }

    /// Empties the cache and the in-memory list
    fn clear(&mut self) {
        self.entries.clear();
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.clear() {
                warn!(path = %cache.path().display(), error = %e, "failed to clear reading list cache");
            }
        }
    }
}
