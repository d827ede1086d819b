//! Gallery records and the media resolver
//!
//! Rows arrive from the store in one of two shapes: a structured `media`
//! list carrying type tags and per-item metadata, or a legacy flat list of
//! URLs. `RecordRow::into_record` normalizes both into a [`Record`] once, at
//! the data-access boundary, so nothing downstream sees the legacy shape.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// URL suffixes that mark a legacy media URL as video
const VIDEO_SUFFIXES: [&str; 3] = [".mp4", ".webm", ".mov"];

/// Path segment that marks a legacy media URL as video
const VIDEO_SEGMENT: &str = "/video/";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Image,
    Video,
}

impl MediaType {
    /// Read a store type tag. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "image" => Some(MediaType::Image),
            "video" => Some(MediaType::Video),
            _ => None,
        }
    }
}

/// A single image or video belonging to a record.
///
/// `title`, `description` and `categories` override the parent record's for
/// display only.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MediaItem {
    pub url: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub title: Option<String>,
    pub description: Option<String>,
    pub categories: Option<Vec<String>>,
}

impl MediaItem {
    pub fn image(url: impl Into<String>) -> Self {
        Self::new(url, MediaType::Image)
    }

    pub fn video(url: impl Into<String>) -> Self {
        Self::new(url, MediaType::Video)
    }

    fn new(url: impl Into<String>, media_type: MediaType) -> Self {
        Self {
            url: url.into(),
            media_type,
            title: None,
            description: None,
            categories: None,
        }
    }

    pub fn is_video(&self) -> bool {
        self.media_type == MediaType::Video
    }

    /// Item-level categories, empty when the item carries none.
    pub fn categories(&self) -> &[String] {
        self.categories.as_deref().unwrap_or_default()
    }
}

/// One gallery entry ("cat") after media normalization.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub media: Vec<MediaItem>,
    /// Set semantics for matching; insertion order is kept for chip display
    pub categories: Vec<String>,
    pub is_featured: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl Record {
    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c == name)
    }
}

/// A record exactly as the store returns it.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RecordRow {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Structured media list. Entries without a URL are dropped.
    #[serde(default, deserialize_with = "deserialize_media")]
    pub media: Option<Vec<MediaItem>>,
    /// Legacy flat URL list
    #[serde(default, alias = "images")]
    pub image_urls: Option<Vec<String>>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub is_featured: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Which media representation a row carries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MediaSource<'a> {
    Structured(&'a [MediaItem]),
    Legacy(&'a [String]),
    Missing,
}

impl RecordRow {
    /// Pick the representation to normalize. A structured list wins when it
    /// has entries; an empty structured list falls through to the legacy one.
    pub fn media_source(&self) -> MediaSource<'_> {
        match (self.media.as_deref(), self.image_urls.as_deref()) {
            (Some(items), _) if !items.is_empty() => MediaSource::Structured(items),
            (_, Some(urls)) if !urls.is_empty() => MediaSource::Legacy(urls),
            _ => MediaSource::Missing,
        }
    }

    pub fn into_record(self) -> Record {
        let media = resolve_media(self.media_source());
        let categories = dedup_categories(self.categories.unwrap_or_default());
        Record {
            id: self.id,
            title: self.title,
            description: self.description,
            media,
            categories,
            is_featured: self.is_featured.unwrap_or(false),
            created_at: self.created_at,
        }
    }
}

/// Convert raw store rows one at a time. A row that does not decode is
/// skipped; it never costs the rest of the collection.
pub fn decode_rows(rows: Vec<serde_json::Value>) -> Vec<Record> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(i, value)| match serde_json::from_value::<RecordRow>(value) {
            Ok(row) => Some(row.into_record()),
            Err(e) => {
                warn!("Skipping malformed record row {i}: {e}");
                None
            }
        })
        .collect()
}

/// Normalize a row's media into the canonical list. Total: a row with no
/// usable media resolves to an empty list.
pub fn resolve_media(source: MediaSource<'_>) -> Vec<MediaItem> {
    match source {
        MediaSource::Structured(items) => items.to_vec(),
        MediaSource::Legacy(urls) => urls
            .iter()
            .map(|url| MediaItem::new(url.clone(), infer_media_type(url)))
            .collect(),
        MediaSource::Missing => Vec::new(),
    }
}

/// Guess the media type of a bare URL (case-insensitive).
pub fn infer_media_type(url: &str) -> MediaType {
    let lower = url.to_ascii_lowercase();
    let is_video = VIDEO_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix))
        || lower.contains(VIDEO_SEGMENT);
    if is_video {
        MediaType::Video
    } else {
        MediaType::Image
    }
}

fn dedup_categories(categories: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(categories.len());
    for category in categories {
        if !category.trim().is_empty() && !seen.contains(&category) {
            seen.push(category);
        }
    }
    seen
}

/// Media entry as stored. Everything is optional so one odd entry cannot
/// fail its row.
#[derive(Deserialize)]
struct MediaItemRow {
    #[serde(default)]
    url: Option<String>,
    #[serde(rename = "type", default)]
    media_type: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    categories: Option<Vec<String>>,
}

impl MediaItemRow {
    /// Unknown or missing type tags fall back to inference from the URL.
    fn into_item(self) -> Option<MediaItem> {
        let url = self.url.filter(|u| !u.trim().is_empty())?;
        let media_type = self
            .media_type
            .as_deref()
            .and_then(MediaType::from_tag)
            .unwrap_or_else(|| infer_media_type(&url));
        Some(MediaItem {
            url,
            media_type,
            title: self.title,
            description: self.description,
            categories: self.categories,
        })
    }
}

fn deserialize_media<'de, D>(deserializer: D) -> Result<Option<Vec<MediaItem>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(entries) = Option::<Vec<serde_json::Value>>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let items = entries
        .into_iter()
        .filter_map(|entry| {
            let item = serde_json::from_value::<MediaItemRow>(entry)
                .ok()
                .and_then(MediaItemRow::into_item);
            if item.is_none() {
                warn!("Dropping media entry without a usable URL");
            }
            item
        })
        .collect();
    Ok(Some(items))
}

/// Timestamps with an offset are taken as given; bare timestamps (a
/// `timestamp without time zone` column) are read as UTC. Anything else
/// leaves the record undated.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(parse_timestamp(&raw))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

/// Store ids are opaque; accept either a JSON string or number.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_with(media: Option<Vec<MediaItem>>, image_urls: Option<Vec<String>>) -> RecordRow {
        RecordRow {
            id: "1".into(),
            media,
            image_urls,
            ..Default::default()
        }
    }

    #[test]
    fn test_structured_media_returned_unchanged() {
        let mut item = MediaItem::video("https://cdn/clip");
        item.title = Some("Zoomies".into());
        let row = row_with(Some(vec![item.clone()]), Some(vec!["https://cdn/a.jpg".into()]));
        assert_eq!(resolve_media(row.media_source()), vec![item]);
    }

    #[test]
    fn test_empty_structured_falls_back_to_legacy() {
        let row = row_with(
            Some(vec![]),
            Some(vec!["https://cdn/a.jpg".into(), "https://cdn/b.webm".into()]),
        );
        let media = resolve_media(row.media_source());
        assert_eq!(media.len(), 2);
        assert_eq!(media[0].media_type, MediaType::Image);
        assert_eq!(media[1].media_type, MediaType::Video);
    }

    #[test]
    fn test_no_media_resolves_to_empty() {
        let row = row_with(Some(vec![]), Some(vec![]));
        assert_eq!(row.media_source(), MediaSource::Missing);
        assert!(resolve_media(row.media_source()).is_empty());

        let row = row_with(None, None);
        assert!(resolve_media(row.media_source()).is_empty());
    }

    #[test]
    fn test_video_inference_is_case_insensitive() {
        assert_eq!(infer_media_type("https://x/VIDEO/a.MP4"), MediaType::Video);
        assert_eq!(infer_media_type("https://x/clip.MOV"), MediaType::Video);
        assert_eq!(infer_media_type("https://x/storage/video/abc"), MediaType::Video);
        assert_eq!(infer_media_type("https://x/a.webm"), MediaType::Video);
    }

    #[test]
    fn test_image_inference() {
        assert_eq!(infer_media_type("https://x/a.jpg"), MediaType::Image);
        assert_eq!(infer_media_type("https://x/videos/a.png"), MediaType::Image);
        assert_eq!(infer_media_type("https://x/a.mp4.png"), MediaType::Image);
    }

    #[test]
    fn test_row_decodes_numeric_id_and_legacy_alias() {
        let json = r#"{
            "id": 42,
            "title": "Mochi",
            "images": ["https://cdn/mochi.jpg"],
            "categories": ["Tabby", "Tabby", ""],
            "is_featured": true,
            "created_at": "2026-10-01T12:00:00Z"
        }"#;
        let row: RecordRow = serde_json::from_str(json).unwrap();
        let record = row.into_record();
        assert_eq!(record.id, "42");
        assert_eq!(record.media, vec![MediaItem::image("https://cdn/mochi.jpg")]);
        assert_eq!(record.categories, vec!["Tabby".to_string()]);
        assert!(record.is_featured);
        assert!(record.created_at.is_some());
    }

    #[test]
    fn test_row_decodes_structured_media() {
        let json = r#"{
            "id": "abc",
            "media": [
                { "url": "https://cdn/a.jpg", "type": "image", "categories": ["Orange"] },
                { "url": "https://cdn/b", "type": "video", "title": "Pounce" }
            ]
        }"#;
        let record = serde_json::from_str::<RecordRow>(json).unwrap().into_record();
        assert_eq!(record.media.len(), 2);
        assert_eq!(record.media[0].categories(), ["Orange".to_string()]);
        assert!(record.media[1].is_video());
        assert_eq!(record.media[1].title.as_deref(), Some("Pounce"));
        assert!(!record.is_featured);
    }

    #[test]
    fn test_unknown_type_tag_falls_back_to_inference() {
        let json = r#"{
            "id": "a",
            "media": [
                { "url": "https://cdn/a.gif", "type": "gif" },
                { "url": "https://cdn/b.webm", "type": "clip" },
                { "url": "https://cdn/c", "type": "VIDEO" },
                { "url": "https://cdn/d.mp4" }
            ]
        }"#;
        let record = serde_json::from_str::<RecordRow>(json).unwrap().into_record();
        let types: Vec<MediaType> = record.media.iter().map(|m| m.media_type).collect();
        assert_eq!(
            types,
            vec![MediaType::Image, MediaType::Video, MediaType::Video, MediaType::Video]
        );
    }

    #[test]
    fn test_media_without_url_is_dropped() {
        let json = r#"{
            "id": "a",
            "media": [{ "type": "image" }, { "url": "  " }, { "url": "https://cdn/a.jpg" }, 7]
        }"#;
        let record = serde_json::from_str::<RecordRow>(json).unwrap().into_record();
        assert_eq!(record.media, vec![MediaItem::image("https://cdn/a.jpg")]);
    }

    #[test]
    fn test_timestamp_without_offset_is_utc() {
        let at = parse_timestamp("2026-10-01T12:00:00.123456").unwrap();
        assert_eq!(at.to_rfc3339(), "2026-10-01T12:00:00.123456+00:00");
        assert!(parse_timestamp("2026-10-01 12:00:00").is_some());
        assert!(parse_timestamp("2026-10-01T12:00:00+02:00").is_some());
        assert!(parse_timestamp("last tuesday").is_none());
    }

    #[test]
    fn test_decode_rows_skips_bad_rows() {
        let rows: Vec<serde_json::Value> = serde_json::from_str(
            r#"[
                { "id": "good" },
                { "id": ["not", "an", "id"] },
                { "id": "also-good", "title": 12 },
                { "title": "no id" }
            ]"#,
        )
        .unwrap();
        let records = decode_rows(rows);
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["good"]);
    }
}
