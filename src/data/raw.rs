//! Typed view of the aggregation API's reading-list payload
//!
//! Every field is optional; missing fields and JSON `null` decode the same
//! way, and unknown fields are ignored.

use serde::Deserialize;

/// One item of the reading list as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawListEntry {
    /// Chapters read
    #[serde(default)]
    pub progress: Option<f64>,
    /// Media details; items without it are skipped
    #[serde(default)]
    pub media: Option<RawMedia>,
}

/// Media details of a reading-list item
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMedia {
    #[serde(default)]
    pub title: Option<RawTitle>,
    #[serde(default)]
    pub cover_image: Option<RawCoverImage>,
    /// Chapter count inferred by the aggregator
    #[serde(default)]
    pub inferred_chapter_count: Option<f64>,
    /// Matching entry on the secondary chapter source
    #[serde(default)]
    pub comick_match: Option<RawComickMatch>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawTitle {
    #[serde(default)]
    pub english: Option<String>,
    #[serde(default)]
    pub romaji: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCoverImage {
    #[serde(default)]
    pub large: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawComickMatch {
    #[serde(default)]
    pub last_chapter: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_item() {
        let json = r##"{
            "progress": 42,
            "media": {
                "title": { "english": "Frieren", "romaji": "Sousou no Frieren" },
                "coverImage": { "large": "https://img/f.jpg", "color": "#43a1e4" },
                "inferredChapterCount": 140,
                "comickMatch": { "lastChapter": 141.5, "slug": "frieren" }
            },
            "status": "CURRENT"
        }"##;

        let item: RawListEntry = serde_json::from_str(json).expect("Failed to parse item");

        assert_eq!(item.progress, Some(42.0));
        let media = item.media.unwrap();
        let title = media.title.unwrap();
        assert_eq!(title.english.as_deref(), Some("Frieren"));
        assert_eq!(title.romaji.as_deref(), Some("Sousou no Frieren"));
        let cover = media.cover_image.unwrap();
        assert_eq!(cover.large.as_deref(), Some("https://img/f.jpg"));
        assert_eq!(cover.color.as_deref(), Some("#43a1e4"));
        assert_eq!(media.inferred_chapter_count, Some(140.0));
        assert_eq!(media.comick_match.unwrap().last_chapter, Some(141.5));
    }

    #[test]
    fn test_parse_sparse_item() {
        let item: RawListEntry = serde_json::from_str("{}").unwrap();
        assert!(item.progress.is_none());
        assert!(item.media.is_none());
    }

    #[test]
    fn test_null_fields_are_absent() {
        let json = r#"{
            "progress": null,
            "media": {
                "title": { "english": null, "romaji": "X" },
                "coverImage": null,
                "inferredChapterCount": null,
                "comickMatch": null
            }
        }"#;

        let item: RawListEntry = serde_json::from_str(json).unwrap();

        assert!(item.progress.is_none());
        let media = item.media.unwrap();
        assert!(media.title.unwrap().english.is_none());
        assert!(media.cover_image.is_none());
        assert!(media.inferred_chapter_count.is_none());
        assert!(media.comick_match.is_none());
    }

    #[test]
    fn test_parse_list() {
        let json = r#"[{"progress": 1}, {"media": null}]"#;
        let items: Vec<RawListEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(items.len(), 2);
    }
}
