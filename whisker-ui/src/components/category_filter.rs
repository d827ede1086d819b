//! Category checklist with its own sub-search

use crate::components::helpers::{ErrorDisplay, LoadingSpinner};
use crate::components::text_input::{TextInput, TextInputSize};
use dioxus::prelude::*;
use std::collections::BTreeSet;
use whisker_common::{CategoryListView, Region, RegionState};

/// While the collection is loading, or after it failed, the list shows the
/// same spinner or error as the grid.
#[component]
pub fn CategoryFilter(
    panel: RegionState<CategoryListView>,
    selected: BTreeSet<String>,
    query: String,
    on_query: EventHandler<String>,
    on_toggle: EventHandler<String>,
) -> Element {
    rsx! {
        section { class: "flex flex-col gap-3", aria_label: "Categories",
            h2 { class: "text-sm font-semibold text-gray-300 uppercase tracking-wide",
                "Categories"
            }
            TextInput {
                value: query,
                on_input: move |value| on_query.call(value),
                size: TextInputSize::Small,
                placeholder: "Find a category",
                aria_label: "Find a category",
                id: Region::CategorySearch.id().to_string(),
            }
            ul {
                id: Region::CategoryList.id(),
                class: "flex flex-col gap-1 max-h-80 overflow-y-auto",
                match panel {
                    RegionState::Loading => rsx! {
                        li {
                            LoadingSpinner { message: "Loading categories...", compact: true }
                        }
                    },
                    RegionState::Failed(message) => rsx! {
                        li {
                            ErrorDisplay { message }
                        }
                    },
                    RegionState::Ready(list) => rsx! {
                        CategoryItems { list, selected, on_toggle }
                    },
                }
            }
        }
    }
}

#[component]
fn CategoryItems(list: CategoryListView, selected: BTreeSet<String>, on_toggle: EventHandler<String>) -> Element {
    rsx! {
        match list {
            CategoryListView::NoCategories => rsx! {
                li { class: "text-gray-500 text-sm", "No categories yet" }
            },
            CategoryListView::NoMatches { query } => rsx! {
                li { class: "text-gray-500 text-sm", "No categories match \"{query}\"" }
            },
            CategoryListView::Entries(entries) => rsx! {
                for entry in entries {
                    CategoryRow {
                        key: "{entry.name}",
                        checked: selected.contains(&entry.name),
                        name: entry.name.clone(),
                        count: entry.count,
                        on_toggle,
                    }
                }
            },
        }
    }
}

#[component]
fn CategoryRow(name: String, count: usize, checked: bool, on_toggle: EventHandler<String>) -> Element {
    let toggled = name.clone();

    rsx! {
        li {
            label { class: "flex items-center gap-2 text-sm text-gray-300 cursor-pointer hover:text-white",
                input {
                    r#type: "checkbox",
                    class: "accent-amber-500",
                    checked,
                    onchange: move |_| on_toggle.call(toggled.clone()),
                }
                span { class: "flex-1 truncate", "{name}" }
                span { class: "text-gray-500 text-xs", "{count}" }
            }
        }
    }
}
