//! Derivation of the "chapters behind" list
//!
//! Normalizes raw reading-list items into `OutdatedEntry` records, drops the
//! ones the user is caught up on, and orders the rest so the titles closest to
//! being caught up come first.

use std::cmp::Ordering;
use tracing::debug;

use super::raw::{RawListEntry, RawMedia};
use super::OutdatedEntry;

/// Title used when the item has neither an English nor a romaji title
pub const NO_TITLE: &str = "No Title";

/// Accent colour used when the cover image has none
pub const DEFAULT_COLOR: &str = "#77DD77";

/// Derives the sorted list of titles with unread chapters
///
/// Items without media are skipped. Items whose total is unknown fall back to
/// their own progress and are therefore dropped as caught up. The result is
/// sorted ascending by chapters left; ties keep their input order.
pub fn derive(raw: &[RawListEntry]) -> Vec<OutdatedEntry> {
    let mut entries: Vec<OutdatedEntry> = raw.iter().filter_map(derive_entry).collect();
    entries.sort_by(|a, b| a.chapters_left.total_cmp(&b.chapters_left));

    debug!(received = raw.len(), behind = entries.len(), "derived reading list");
    entries
}

/// Derives a single entry, or `None` if the item is skipped or caught up
fn derive_entry(item: &RawListEntry) -> Option<OutdatedEntry> {
    let media = item.media.as_ref()?;

    let chapters_read = item.progress.unwrap_or(0.0);
    let total_chapters = resolve_total_chapters(media).unwrap_or(chapters_read);

    // Also rejects NaN on either side.
    if total_chapters.partial_cmp(&chapters_read) != Some(Ordering::Greater) {
        return None;
    }

    Some(OutdatedEntry::new(
        resolve_title(media),
        media
            .cover_image
            .as_ref()
            .and_then(|cover| cover.large.clone())
            .unwrap_or_default(),
        media
            .cover_image
            .as_ref()
            .and_then(|cover| cover.color.clone())
            .unwrap_or_else(|| DEFAULT_COLOR.to_string()),
        chapters_read,
        total_chapters,
    ))
}

/// English title, then romaji, then `NO_TITLE`
fn resolve_title(media: &RawMedia) -> String {
    media
        .title
        .as_ref()
        .and_then(|title| title.english.clone().or_else(|| title.romaji.clone()))
        .unwrap_or_else(|| NO_TITLE.to_string())
}

/// Inferred chapter count, then the matched source's last chapter
fn resolve_total_chapters(media: &RawMedia) -> Option<f64> {
    media.inferred_chapter_count.or_else(|| {
        media
            .comick_match
            .as_ref()
            .and_then(|matched| matched.last_chapter)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::raw::{RawComickMatch, RawCoverImage, RawTitle};

    fn media(romaji: &str, inferred: Option<f64>, last_chapter: Option<f64>) -> RawMedia {
        RawMedia {
            title: Some(RawTitle {
                english: None,
                romaji: Some(romaji.to_string()),
            }),
            cover_image: Some(RawCoverImage::default()),
            inferred_chapter_count: inferred,
            comick_match: last_chapter.map(|c| RawComickMatch {
                last_chapter: Some(c),
            }),
        }
    }

    fn item(romaji: &str, progress: f64, inferred: Option<f64>) -> RawListEntry {
        RawListEntry {
            progress: Some(progress),
            media: Some(media(romaji, inferred, None)),
        }
    }

    #[test]
    fn test_romaji_item_with_inferred_count() {
        let raw = vec![item("X", 5.0, Some(10.0))];

        let result = derive(&raw);

        assert_eq!(result.len(), 1);
        let entry = &result[0];
        assert_eq!(entry.title, "X");
        assert_eq!(entry.chapters_read, 5.0);
        assert_eq!(entry.total_chapters, 10.0);
        assert_eq!(entry.chapters_left, 5.0);
        assert_eq!(entry.color, "#77DD77");
        assert_eq!(entry.image_url, "");
    }

    #[test]
    fn test_item_without_media_is_skipped() {
        let raw = vec![
            RawListEntry {
                progress: Some(3.0),
                media: None,
            },
            item("kept", 1.0, Some(2.0)),
        ];

        let result = derive(&raw);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "kept");
    }

    #[test]
    fn test_item_without_totals_is_excluded() {
        let raw = vec![item("caught up?", 5.0, None)];
        assert!(derive(&raw).is_empty());
    }

    #[test]
    fn test_item_ahead_or_level_is_excluded() {
        let raw = vec![
            item("level", 10.0, Some(10.0)),
            item("ahead", 12.0, Some(10.0)),
        ];
        assert!(derive(&raw).is_empty());
    }

    #[test]
    fn test_missing_progress_counts_as_zero() {
        let raw = vec![RawListEntry {
            progress: None,
            media: Some(media("new", Some(3.0), None)),
        }];

        let result = derive(&raw);

        assert_eq!(result[0].chapters_read, 0.0);
        assert_eq!(result[0].chapters_left, 3.0);
    }

    #[test]
    fn test_inferred_count_takes_priority_over_match() {
        let raw = vec![RawListEntry {
            progress: Some(10.0),
            media: Some(media("both", Some(20.0), Some(30.0))),
        }];

        assert_eq!(derive(&raw)[0].total_chapters, 20.0);
    }

    #[test]
    fn test_match_last_chapter_used_without_inferred_count() {
        let raw = vec![RawListEntry {
            progress: Some(10.0),
            media: Some(media("matched", None, Some(12.5))),
        }];

        let result = derive(&raw);

        assert_eq!(result[0].total_chapters, 12.5);
        assert_eq!(result[0].chapters_left, 2.5);
    }

    #[test]
    fn test_english_title_preferred() {
        let mut m = media("Shingeki no Kyojin", Some(2.0), None);
        m.title = Some(RawTitle {
            english: Some("Attack on Titan".to_string()),
            romaji: Some("Shingeki no Kyojin".to_string()),
        });
        let raw = vec![RawListEntry {
            progress: Some(1.0),
            media: Some(m),
        }];

        assert_eq!(derive(&raw)[0].title, "Attack on Titan");
    }

    #[test]
    fn test_missing_title_falls_back_to_placeholder() {
        let mut m = media("", Some(2.0), None);
        m.title = None;
        let raw = vec![RawListEntry {
            progress: Some(1.0),
            media: Some(m),
        }];

        assert_eq!(derive(&raw)[0].title, NO_TITLE);
    }

    #[test]
    fn test_cover_image_fields_are_copied() {
        let mut m = media("Y", Some(2.0), None);
        m.cover_image = Some(RawCoverImage {
            large: Some("https://img/y.png".to_string()),
            color: Some("#e4a15d".to_string()),
        });
        let raw = vec![RawListEntry {
            progress: Some(1.0),
            media: Some(m),
        }];

        let result = derive(&raw);

        assert_eq!(result[0].image_url, "https://img/y.png");
        assert_eq!(result[0].color, "#e4a15d");
    }

    #[test]
    fn test_sorted_ascending_by_chapters_left() {
        let raw = vec![
            item("far", 0.0, Some(50.0)),
            item("close", 9.0, Some(10.0)),
            item("caught up", 4.0, None),
            item("middle", 5.0, Some(15.0)),
        ];

        let result = derive(&raw);
        let titles: Vec<&str> = result.iter().map(|e| e.title.as_str()).collect();

        assert_eq!(titles, vec!["close", "middle", "far"]);
        for pair in result.windows(2) {
            assert!(pair[0].chapters_left <= pair[1].chapters_left);
        }
    }

    #[test]
    fn test_ties_keep_input_order() {
        let raw = vec![
            item("first", 1.0, Some(3.0)),
            item("second", 5.0, Some(7.0)),
            item("third", 0.0, Some(2.0)),
        ];

        let titles: Vec<String> = derive(&raw).into_iter().map(|e| e.title).collect();

        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_surviving_entries_are_consistent() {
        let raw: Vec<RawListEntry> = (0..20)
            .map(|i| item(&format!("t{}", i), (i % 7) as f64, Some((i % 5) as f64 * 3.0)))
            .collect();

        for entry in derive(&raw) {
            assert_eq!(entry.chapters_left, entry.total_chapters - entry.chapters_read);
            assert!(entry.chapters_left > 0.0);
        }
    }

    #[test]
    fn test_nan_total_is_excluded() {
        let raw = vec![item("nan", 1.0, Some(f64::NAN))];
        assert!(derive(&raw).is_empty());
    }
}
