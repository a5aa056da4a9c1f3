//! Core data models for mangalag
//!
//! Raw reading-list records as delivered by the aggregation API, the client
//! that fetches them, and the derivation that turns them into the sorted list
//! of titles the user is behind on.

pub mod client;
pub mod derivation;
pub mod raw;

pub use client::{FetchError, ReadingListClient};
pub use derivation::{derive, DEFAULT_COLOR, NO_TITLE};
pub use raw::{RawComickMatch, RawCoverImage, RawListEntry, RawMedia, RawTitle};

use serde::{Deserialize, Serialize};

/// A title with unread chapters, as cached and rendered
///
/// Serialized with camelCase keys; this is the on-disk cache format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutdatedEntry {
    /// Display title
    pub title: String,
    /// Cover image URL, empty if unknown
    pub image_url: String,
    /// Accent colour as `#RRGGBB`
    pub color: String,
    /// Chapters the user has read
    pub chapters_read: f64,
    /// Latest known chapter
    pub total_chapters: f64,
    /// `total_chapters - chapters_read`, always positive
    pub chapters_left: f64,
}

impl OutdatedEntry {
    /// Builds an entry, computing `chapters_left` from the two counts
    pub fn new(
        title: String,
        image_url: String,
        color: String,
        chapters_read: f64,
        total_chapters: f64,
    ) -> Self {
        Self {
            title,
            image_url,
            color,
            chapters_read,
            total_chapters,
            chapters_left: total_chapters - chapters_read,
        }
    }
}
