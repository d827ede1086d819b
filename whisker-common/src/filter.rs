//! Filter engine
//!
//! Category selection and the search term combine with AND. Within the
//! category selection a record must carry every selected name, either on
//! itself or on one of its media items.

use crate::record::Record;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// How the visible records are laid out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
    /// One unit per record
    #[default]
    Grouped,
    /// One unit per media item, flattened across records
    PerItem,
}

impl ViewMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            ViewMode::Grouped => "grouped",
            ViewMode::PerItem => "per-item",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown view mode: {0}")]
pub struct UnknownViewMode(pub String);

impl FromStr for ViewMode {
    type Err = UnknownViewMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grouped" => Ok(ViewMode::Grouped),
            "per-item" => Ok(ViewMode::PerItem),
            other => Err(UnknownViewMode(other.to_string())),
        }
    }
}

/// Session-lifetime filter state. Starts empty in grouped mode and is never
/// persisted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterState {
    selected_categories: BTreeSet<String>,
    search_term: String,
    view_mode: ViewMode,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_categories(&self) -> &BTreeSet<String> {
        &self.selected_categories
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected_categories.contains(name)
    }

    /// Flip a category. Returns whether it is selected afterwards.
    pub fn toggle_category(&mut self, name: &str) -> bool {
        if self.selected_categories.remove(name) {
            false
        } else {
            self.selected_categories.insert(name.to_string());
            true
        }
    }

    /// The settled (post-debounce) search term.
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    /// Whether any category or search filter is narrowing the records.
    pub fn is_active(&self) -> bool {
        !self.selected_categories.is_empty() || !self.search_term.trim().is_empty()
    }

    /// Drop every category and the search term. The view mode is kept.
    pub fn clear(&mut self) {
        self.selected_categories.clear();
        self.search_term.clear();
    }

    pub fn apply<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        filter_records(records, &self.selected_categories, &self.search_term)
    }
}

/// Return the records passing both the category and the text predicate, in
/// their original order. Recomputed from scratch on every call.
pub fn filter_records<'a>(
    records: &'a [Record],
    selected: &BTreeSet<String>,
    search_term: &str,
) -> Vec<&'a Record> {
    let needle = search_term.trim().to_lowercase();
    records
        .iter()
        .filter(|record| matches_categories(record, selected) && matches_text(record, &needle))
        .collect()
}

fn matches_categories(record: &Record, selected: &BTreeSet<String>) -> bool {
    if selected.is_empty() {
        return true;
    }
    if selected.iter().all(|name| record.has_category(name)) {
        return true;
    }
    record.media.iter().any(|item| {
        let item_categories = item.categories();
        selected
            .iter()
            .all(|name| item_categories.iter().any(|c| c == name))
    })
}

/// `needle` must already be lowercased.
fn matches_text(record: &Record, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let contains = |text: &Option<String>| {
        text.as_deref()
            .is_some_and(|t| t.to_lowercase().contains(needle))
    };
    contains(&record.title)
        || contains(&record.description)
        || record
            .media
            .iter()
            .any(|item| contains(&item.title) || contains(&item.description))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MediaItem;

    fn record(id: &str, title: &str, categories: &[&str]) -> Record {
        Record {
            id: id.into(),
            title: Some(title.into()),
            description: None,
            media: vec![MediaItem::image(format!("https://cdn/{id}.jpg"))],
            categories: categories.iter().map(|c| c.to_string()).collect(),
            is_featured: false,
            created_at: None,
        }
    }

    fn selection(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn ids(records: &[&Record]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_no_filters_is_identity() {
        let records = vec![record("a", "Mochi", &["Tabby"]), record("b", "Biscuit", &[])];
        let filtered = filter_records(&records, &BTreeSet::new(), "");
        assert_eq!(ids(&filtered), vec!["a", "b"]);
    }

    #[test]
    fn test_categories_use_and_semantics() {
        let records = vec![
            record("a", "Mochi", &["Tabby", "Kitten"]),
            record("b", "Biscuit", &["Tabby"]),
            record("c", "Pudding", &["Kitten"]),
        ];
        let filtered = filter_records(&records, &selection(&["Tabby", "Kitten"]), "");
        assert_eq!(ids(&filtered), vec!["a"]);
    }

    #[test]
    fn test_media_item_categories_can_satisfy_selection() {
        let mut r = record("a", "Mochi", &["Tabby"]);
        let mut item = MediaItem::image("https://cdn/sleepy.jpg");
        item.categories = Some(vec!["Sleepy".into(), "Kitten".into()]);
        r.media.push(item);
        let records = vec![r];

        assert_eq!(filter_records(&records, &selection(&["Sleepy", "Kitten"]), "").len(), 1);
    }

    #[test]
    fn test_selection_is_not_split_across_record_and_item() {
        let mut r = record("a", "Mochi", &["Tabby"]);
        let mut item = MediaItem::image("https://cdn/sleepy.jpg");
        item.categories = Some(vec!["Sleepy".into()]);
        r.media.push(item);
        let records = vec![r];

        assert!(filter_records(&records, &selection(&["Tabby", "Sleepy"]), "").is_empty());
    }

    #[test]
    fn test_text_matches_title_description_and_items() {
        let mut described = record("b", "Biscuit", &[]);
        described.description = Some("Loves the SUNNY windowsill".into());
        let mut captioned = record("c", "Pudding", &[]);
        captioned.media[0].title = Some("Sunny nap".into());
        let records = vec![record("a", "Mochi", &[]), described, captioned];

        assert_eq!(ids(&filter_records(&records, &BTreeSet::new(), "sunny")), vec!["b", "c"]);
        assert_eq!(ids(&filter_records(&records, &BTreeSet::new(), "MOCHI")), vec!["a"]);
    }

    #[test]
    fn test_text_and_categories_combine_with_and() {
        let records = vec![
            record("a", "Mochi", &["Tabby"]),
            record("b", "Mochi Jr", &["Siamese"]),
        ];
        let filtered = filter_records(&records, &selection(&["Tabby"]), "mochi");
        assert_eq!(ids(&filtered), vec!["a"]);
    }

    #[test]
    fn test_toggle_category() {
        let mut state = FilterState::new();
        assert!(state.toggle_category("Tabby"));
        assert!(state.is_selected("Tabby"));
        assert!(state.is_active());
        assert!(!state.toggle_category("Tabby"));
        assert!(!state.is_active());
    }

    #[test]
    fn test_clear_keeps_view_mode() {
        let mut state = FilterState::new();
        state.toggle_category("Tabby");
        state.set_search_term("mochi");
        state.set_view_mode(ViewMode::PerItem);
        state.clear();
        assert!(!state.is_active());
        assert_eq!(state.view_mode(), ViewMode::PerItem);
    }

    #[test]
    fn test_view_mode_round_trips_through_str() {
        assert_eq!("per-item".parse::<ViewMode>(), Ok(ViewMode::PerItem));
        assert_eq!(ViewMode::Grouped.to_string(), "grouped");
        assert_eq!(
            "list".parse::<ViewMode>(),
            Err(UnknownViewMode("list".into()))
        );
    }
}
