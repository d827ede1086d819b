use serde::{Deserialize, Serialize};

/// Tunables for the filter, renderer and lightbox.
///
/// Every field has a default, so a partial JSON document only overrides
/// what it names.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Quiescence window before a search keystroke re-filters
    pub search_debounce_ms: u64,
    /// Description length on grouped cards before the ellipsis marker
    pub grouped_description_budget: usize,
    /// Description length on per-item tiles before the ellipsis marker
    pub per_item_description_budget: usize,
    /// Category chips shown before the "+N" overflow chip
    pub visible_chips: usize,
    /// How far back the Recent shelf looks
    pub recent_window_days: i64,
    /// Maximum number of records on the Recent shelf
    pub recent_cap: usize,
    /// Horizontal swipe distance, as a fraction of viewport width, that dismisses the lightbox
    pub swipe_distance_ratio: f64,
    /// How much the horizontal component must dominate the vertical one
    pub swipe_dominance: f64,
    /// Delay before video elements are handed to the visibility observer
    pub observer_defer_ms: u64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: 300,
            grouped_description_budget: 80,
            per_item_description_budget: 60,
            visible_chips: 2,
            recent_window_days: 7,
            recent_cap: 8,
            swipe_distance_ratio: 0.20,
            swipe_dominance: 1.5,
            observer_defer_ms: 50,
        }
    }
}

impl GalleryConfig {
    /// Parse a JSON override on top of the defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = GalleryConfig::from_json(r#"{ "search_debounce_ms": 150 }"#).unwrap();
        assert_eq!(config.search_debounce_ms, 150);
        assert_eq!(config.grouped_description_budget, 80);
        assert_eq!(config.recent_cap, 8);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(GalleryConfig::from_json("{ nope").is_err());
    }
}
