//! Gallery page view - pure rendering, no data fetching
//!
//! ## Reactive State Pattern
//! Accepts `ReadStore<GalleryState>` and reads the derived views through the
//! session lens. Every interaction is routed through the subscription table
//! into a [`GalleryAction`]; the owner dispatches it and runs the resulting
//! effects.

use crate::components::button::{Button, ButtonVariant};
use crate::components::category_filter::CategoryFilter;
use crate::components::gallery_card::{ItemTileView, RecordCardView};
use crate::components::helpers::{ErrorDisplay, LoadingSpinner};
use crate::components::icons::ImageIcon;
use crate::components::lightbox::Lightbox;
use crate::components::routing::emit;
use crate::components::segmented_control::ViewModeControl;
use crate::components::shelf::{Shelf, ShelfKind};
use crate::components::text_input::{TextInput, TextInputSize};
use crate::stores::gallery::{GalleryState, GalleryStateStoreExt};
use dioxus::prelude::*;
use std::collections::BTreeSet;
use whisker_common::{
    CategoryListView, EventData, EventKind, GalleryAction, GalleryUnit, GalleryView as GridView, LightboxView,
    RecordCard, Region, RegionState, ViewMode,
};

/// Everything one render needs, derived from the session without cloning
/// its records.
struct Frame {
    loading: bool,
    error: Option<String>,
    search_input: String,
    view_mode: ViewMode,
    filtered: bool,
    clearable: bool,
    grid: GridView,
    recent: Vec<RecordCard>,
    popular: Vec<RecordCard>,
    categories: RegionState<CategoryListView>,
    selected: BTreeSet<String>,
    category_query: String,
    lightbox: Option<LightboxView>,
}

fn frame(state: ReadStore<GalleryState>) -> Frame {
    let session = state.session();
    let session = session.read();
    let filter = session.filter();
    Frame {
        loading: session.is_loading(),
        error: session.load_error().map(str::to_string),
        search_input: session.search_input().to_string(),
        view_mode: filter.view_mode(),
        filtered: filter.is_active(),
        clearable: filter.is_active() || !session.search_input().is_empty(),
        grid: session.gallery(),
        recent: session.recent(chrono::Utc::now()),
        popular: session.popular(),
        categories: session.category_panel(),
        selected: filter.selected_categories().clone(),
        category_query: session.category_query().to_string(),
        lightbox: session.lightbox(),
    }
}

#[component]
pub fn GalleryView(state: ReadStore<GalleryState>, on_action: EventHandler<GalleryAction>) -> Element {
    let Frame {
        loading,
        error,
        search_input,
        view_mode,
        filtered,
        clearable,
        grid,
        recent,
        popular,
        categories,
        selected,
        category_query,
        lightbox,
    } = frame(state);

    let open_from = move |kind: ShelfKind| {
        move |record_id: String| emit(on_action, EventKind::Click, kind.region(), EventData::Record(record_id))
    };

    rsx! {
        div { class: "flex-grow overflow-y-auto flex flex-col py-10",
            div { class: "container mx-auto flex flex-col gap-8 px-4",
                header { class: "flex flex-col gap-4 md:flex-row md:items-center",
                    h1 { class: "text-3xl font-bold text-white flex-1", "Cat Gallery" }
                    div { class: "md:w-80",
                        TextInput {
                            value: search_input,
                            on_input: move |text| {
                                emit(on_action, EventKind::Input, Region::SearchInput, EventData::Text(text))
                            },
                            size: TextInputSize::Medium,
                            placeholder: "Search cats",
                            aria_label: "Search cats",
                            id: Region::SearchInput.id().to_string(),
                        }
                    }
                    ViewModeControl {
                        selected: view_mode,
                        on_change: move |mode| {
                            emit(on_action, EventKind::Select, Region::ViewModeToggle, EventData::ViewMode(mode))
                        },
                    }
                }

                Shelf {
                    kind: ShelfKind::Recent,
                    cards: recent,
                    loading,
                    error: error.clone(),
                    on_card_click: open_from(ShelfKind::Recent),
                }
                Shelf {
                    kind: ShelfKind::Popular,
                    cards: popular,
                    loading,
                    error: error.clone(),
                    on_card_click: open_from(ShelfKind::Popular),
                }

                div { class: "flex flex-col gap-8 md:flex-row",
                    aside { class: "md:w-60 flex-shrink-0",
                        CategoryFilter {
                            panel: categories,
                            selected,
                            query: category_query,
                            on_query: move |query| {
                                emit(on_action, EventKind::Input, Region::CategorySearch, EventData::Text(query))
                            },
                            on_toggle: move |name| {
                                emit(on_action, EventKind::Toggle, Region::CategoryList, EventData::Text(name))
                            },
                        }
                    }
                    main { class: "flex-1 flex flex-col gap-4",
                        div { class: "flex items-center gap-4",
                            p {
                                id: Region::ResultCount.id(),
                                class: "text-gray-400 text-sm",
                                aria_live: "polite",
                                if !loading && error.is_none() {
                                    "{grid.label}"
                                }
                            }
                            if clearable {
                                Button {
                                    variant: ButtonVariant::Ghost,
                                    id: Region::ClearFilters.id().to_string(),
                                    onclick: move |_| {
                                        emit(on_action, EventKind::Click, Region::ClearFilters, EventData::None)
                                    },
                                    "Clear filters"
                                }
                            }
                        }
                        if loading {
                            LoadingSpinner {}
                        } else if let Some(err) = error {
                            ErrorDisplay { message: err }
                        } else if grid.is_empty() {
                            EmptyGrid { filtered }
                        } else {
                            GalleryGrid { grid, on_action }
                        }
                    }
                }
            }

            Lightbox { view: lightbox, on_action }
        }
    }
}

#[component]
fn EmptyGrid(filtered: bool) -> Element {
    let (heading, hint) = if filtered {
        ("No cats match", "Try fewer categories or a different search.")
    } else {
        ("No cats yet", "Check back soon.")
    };

    rsx! {
        div { class: "text-center py-12",
            div { class: "text-gray-400 mb-4",
                ImageIcon { class: "w-16 h-16 mx-auto" }
            }
            h2 { class: "text-2xl font-bold text-gray-300 mb-2", "{heading}" }
            p { class: "text-gray-500", "{hint}" }
        }
    }
}

#[component]
fn GalleryGrid(grid: GridView, on_action: EventHandler<GalleryAction>) -> Element {
    rsx! {
        div {
            id: Region::Grid.id(),
            class: "grid grid-cols-2 sm:grid-cols-3 lg:grid-cols-4 gap-6",
            "data-view-mode": "{grid.mode}",
            for unit in grid.units {
                match unit {
                    GalleryUnit::Record(card) => rsx! {
                        RecordCardView {
                            key: "{card.record_id}",
                            card,
                            on_click: move |record_id| {
                                emit(on_action, EventKind::Click, Region::Grid, EventData::Record(record_id))
                            },
                        }
                    },
                    GalleryUnit::Item(tile) => rsx! {
                        ItemTileView {
                            key: "{tile.key()}",
                            tile,
                            on_click: move |(record_id, media_index)| {
                                let data = EventData::Item {
                                    record_id,
                                    media_index,
                                };
                                emit(on_action, EventKind::Click, Region::Grid, data)
                            },
                        }
                    },
                }
            }
        }
    }
}
