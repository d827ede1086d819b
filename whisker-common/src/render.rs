//! View projections for the gallery grid and the shelves
//!
//! Turns filtered records into renderable units. The UI layer only lays
//! these out; every truncation, fallback and count decision is made here.

use crate::config::GalleryConfig;
use crate::filter::ViewMode;
use crate::record::{MediaItem, Record};
use chrono::{DateTime, Duration, Utc};
use std::borrow::Cow;

/// Appended to a description cut at its character budget
pub const ELLIPSIS: &str = "...";

/// Cut `text` to `budget` characters, appending [`ELLIPSIS`] only when
/// something was removed.
pub fn truncate(text: &str, budget: usize) -> Cow<'_, str> {
    match text.char_indices().nth(budget) {
        Some((cut, _)) => Cow::Owned(format!("{}{ELLIPSIS}", &text[..cut])),
        None => Cow::Borrowed(text),
    }
}

/// Category chips for a card: the first few names plus a "+N" overflow.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CategoryChips {
    pub visible: Vec<String>,
    pub overflow: usize,
}

impl CategoryChips {
    pub fn from_categories(categories: &[String], max_visible: usize) -> Self {
        let visible: Vec<String> = categories.iter().take(max_visible).cloned().collect();
        Self {
            overflow: categories.len() - visible.len(),
            visible,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}

/// Grouped-mode unit: one per record.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordCard {
    pub record_id: String,
    /// First media item; `None` renders the placeholder
    pub cover: Option<MediaItem>,
    /// Badge count (`media.len() - 1`), zero when there is no badge
    pub extra_media: usize,
    pub title: String,
    pub description: String,
    pub chips: CategoryChips,
}

impl RecordCard {
    pub fn from_record(record: &Record, config: &GalleryConfig) -> Self {
        Self {
            record_id: record.id.clone(),
            cover: record.media.first().cloned(),
            extra_media: record.media.len().saturating_sub(1),
            title: record.title.clone().unwrap_or_default(),
            description: record
                .description
                .as_deref()
                .map(|d| truncate(d, config.grouped_description_budget).into_owned())
                .unwrap_or_default(),
            chips: CategoryChips::from_categories(&record.categories, config.visible_chips),
        }
    }
}

/// Per-item-mode unit: one per media item.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemTile {
    pub record_id: String,
    /// Position of this item within its record, used to open the lightbox
    pub media_index: usize,
    pub media: MediaItem,
    pub title: String,
    pub description: String,
    /// Always the parent record's categories
    pub chips: CategoryChips,
}

impl ItemTile {
    fn new(record: &Record, media_index: usize, item: &MediaItem, config: &GalleryConfig) -> Self {
        let description = item_override(&item.description, &record.description)
            .map(|d| truncate(d, config.per_item_description_budget).into_owned())
            .unwrap_or_default();
        Self {
            record_id: record.id.clone(),
            media_index,
            media: item.clone(),
            title: item_override(&item.title, &record.title)
                .unwrap_or_default()
                .to_string(),
            description,
            chips: CategoryChips::from_categories(&record.categories, config.visible_chips),
        }
    }

    /// Stable key for list diffing.
    pub fn key(&self) -> String {
        format!("{}-{}", self.record_id, self.media_index)
    }
}

/// Item-level text when present and non-empty, else the record's.
pub(crate) fn item_override<'a>(
    item: &'a Option<String>,
    record: &'a Option<String>,
) -> Option<&'a str> {
    item.as_deref()
        .filter(|s| !s.is_empty())
        .or(record.as_deref())
}

#[derive(Clone, Debug, PartialEq)]
pub enum GalleryUnit {
    Record(RecordCard),
    Item(ItemTile),
}

/// The main grid plus its count label.
#[derive(Clone, Debug, PartialEq)]
pub struct GalleryView {
    pub mode: ViewMode,
    pub units: Vec<GalleryUnit>,
    pub count: usize,
    pub label: String,
}

impl GalleryView {
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

pub fn render_gallery(records: &[&Record], mode: ViewMode, config: &GalleryConfig) -> GalleryView {
    let units: Vec<GalleryUnit> = match mode {
        ViewMode::Grouped => records
            .iter()
            .map(|record| GalleryUnit::Record(RecordCard::from_record(record, config)))
            .collect(),
        ViewMode::PerItem => records
            .iter()
            .flat_map(|record| {
                record
                    .media
                    .iter()
                    .enumerate()
                    .map(move |(idx, item)| GalleryUnit::Item(ItemTile::new(record, idx, item, config)))
            })
            .collect(),
    };

    let count = units.len();
    GalleryView {
        mode,
        label: count_label(count, mode),
        units,
        count,
    }
}

/// "1 cat", "3 cats", "1 photo", "6 photos".
pub fn count_label(count: usize, mode: ViewMode) -> String {
    let noun = match mode {
        ViewMode::Grouped => "cat",
        ViewMode::PerItem => "photo",
    };
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// How far ahead of the local clock a store timestamp may be
pub const CLOCK_SKEW_MINUTES: i64 = 60;

/// Records created within the recent window, newest first, capped.
/// Records without a timestamp, or dated beyond [`CLOCK_SKEW_MINUTES`] in
/// the future, never qualify.
pub fn recent_shelf(records: &[Record], now: DateTime<Utc>, config: &GalleryConfig) -> Vec<RecordCard> {
    let cutoff = now - Duration::days(config.recent_window_days);
    let latest = now + Duration::minutes(CLOCK_SKEW_MINUTES);
    let mut recent: Vec<(&Record, DateTime<Utc>)> = records
        .iter()
        .filter_map(|record| record.created_at.map(|at| (record, at)))
        .filter(|(_, at)| *at >= cutoff && *at <= latest)
        .collect();
    recent.sort_by(|a, b| b.1.cmp(&a.1));

    recent
        .into_iter()
        .take(config.recent_cap)
        .map(|(record, _)| RecordCard::from_record(record, config))
        .collect()
}

/// Featured records, in store order.
pub fn popular_shelf(records: &[Record], config: &GalleryConfig) -> Vec<RecordCard> {
    records
        .iter()
        .filter(|record| record.is_featured)
        .map(|record| RecordCard::from_record(record, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_media(id: &str, media_count: usize) -> Record {
        Record {
            id: id.into(),
            title: Some(format!("Cat {id}")),
            description: None,
            media: (0..media_count)
                .map(|i| MediaItem::image(format!("https://cdn/{id}/{i}.jpg")))
                .collect(),
            categories: vec![],
            is_featured: false,
            created_at: None,
        }
    }

    #[test]
    fn test_truncate_at_budget() {
        let long = "a".repeat(85);
        let truncated = truncate(&long, 80);
        assert_eq!(truncated, format!("{}...", "a".repeat(80)));

        let exact = "b".repeat(80);
        assert!(matches!(truncate(&exact, 80), Cow::Borrowed(_)));
        assert_eq!(truncate(&exact, 80), exact);
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let text = "ñ".repeat(61);
        assert_eq!(truncate(&text, 60), format!("{}...", "ñ".repeat(60)));
    }

    #[test]
    fn test_chips_overflow() {
        let cats: Vec<String> = ["Tabby", "Kitten", "Sleepy", "Orange"]
            .iter()
            .map(|c| c.to_string())
            .collect();
        let chips = CategoryChips::from_categories(&cats, 2);
        assert_eq!(chips.visible, vec!["Tabby", "Kitten"]);
        assert_eq!(chips.overflow, 2);

        let chips = CategoryChips::from_categories(&cats[..1], 2);
        assert_eq!(chips.overflow, 0);
    }

    #[test]
    fn test_counts_follow_view_mode() {
        let records = vec![
            record_with_media("a", 1),
            record_with_media("b", 3),
            record_with_media("c", 2),
        ];
        let refs: Vec<&Record> = records.iter().collect();
        let config = GalleryConfig::default();

        let grouped = render_gallery(&refs, ViewMode::Grouped, &config);
        assert_eq!(grouped.count, 3);
        assert_eq!(grouped.label, "3 cats");

        let per_item = render_gallery(&refs, ViewMode::PerItem, &config);
        assert_eq!(per_item.count, 6);
        assert_eq!(per_item.label, "6 photos");
    }

    #[test]
    fn test_count_label_singular() {
        assert_eq!(count_label(1, ViewMode::Grouped), "1 cat");
        assert_eq!(count_label(1, ViewMode::PerItem), "1 photo");
        assert_eq!(count_label(0, ViewMode::PerItem), "0 photos");
    }

    #[test]
    fn test_grouped_card_badge_and_placeholder() {
        let config = GalleryConfig::default();
        let card = RecordCard::from_record(&record_with_media("a", 3), &config);
        assert_eq!(card.extra_media, 2);
        assert!(card.cover.is_some());

        let empty = RecordCard::from_record(&record_with_media("b", 0), &config);
        assert_eq!(empty.extra_media, 0);
        assert!(empty.cover.is_none());
    }

    #[test]
    fn test_per_item_text_falls_back_to_record() {
        let mut record = record_with_media("a", 2);
        record.description = Some("d".repeat(70));
        record.media[1].title = Some("Pounce".into());
        record.media[1].description = Some(String::new());
        let refs = vec![&record];

        let view = render_gallery(&refs, ViewMode::PerItem, &GalleryConfig::default());
        let tiles: Vec<&ItemTile> = view
            .units
            .iter()
            .map(|u| match u {
                GalleryUnit::Item(tile) => tile,
                _ => panic!("Expected Item"),
            })
            .collect();

        assert_eq!(tiles[0].title, "Cat a");
        assert_eq!(tiles[1].title, "Pounce");
        assert_eq!(tiles[1].media_index, 1);
        assert_eq!(tiles[1].description, format!("{}...", "d".repeat(60)));
    }

    #[test]
    fn test_recent_shelf_window() {
        let now = Utc::now();
        let mut fresh = record_with_media("fresh", 1);
        fresh.created_at = Some(now - Duration::days(6));
        let mut stale = record_with_media("stale", 1);
        stale.created_at = Some(now - Duration::days(8));
        let undated = record_with_media("undated", 1);

        let shelf = recent_shelf(&[fresh, stale, undated], now, &GalleryConfig::default());
        let ids: Vec<&str> = shelf.iter().map(|c| c.record_id.as_str()).collect();
        assert_eq!(ids, vec!["fresh"]);
    }

    #[test]
    fn test_recent_shelf_ignores_future_dates() {
        let now = Utc::now();
        let mut skewed = record_with_media("skewed", 1);
        skewed.created_at = Some(now + Duration::minutes(30));
        let mut future = record_with_media("future", 1);
        future.created_at = Some(now + Duration::days(400));

        let shelf = recent_shelf(&[skewed, future], now, &GalleryConfig::default());
        let ids: Vec<&str> = shelf.iter().map(|c| c.record_id.as_str()).collect();
        assert_eq!(ids, vec!["skewed"]);
    }

    #[test]
    fn test_recent_shelf_newest_first_and_capped() {
        let now = Utc::now();
        let records: Vec<Record> = (0..10)
            .map(|i| {
                let mut r = record_with_media(&i.to_string(), 1);
                r.created_at = Some(now - Duration::hours(i * 3));
                r
            })
            .collect();

        let shelf = recent_shelf(&records, now, &GalleryConfig::default());
        assert_eq!(shelf.len(), 8);
        assert_eq!(shelf[0].record_id, "0");
        assert_eq!(shelf[7].record_id, "7");
    }

    #[test]
    fn test_recent_shelf_empty_when_nothing_qualifies() {
        let now = Utc::now();
        let mut old = record_with_media("old", 1);
        old.created_at = Some(now - Duration::days(30));
        assert!(recent_shelf(&[old], now, &GalleryConfig::default()).is_empty());
    }

    #[test]
    fn test_popular_shelf_featured_only() {
        let mut featured = record_with_media("star", 1);
        featured.is_featured = true;
        let shelf = popular_shelf(&[record_with_media("plain", 1), featured], &GalleryConfig::default());
        assert_eq!(shelf.len(), 1);
        assert_eq!(shelf[0].record_id, "star");
        assert!(popular_shelf(&[record_with_media("plain", 1)], &GalleryConfig::default()).is_empty());
    }
}
