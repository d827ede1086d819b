//! Horizontal Recent / Popular shelves

use crate::components::gallery_card::RecordCardView;
use crate::components::helpers::{ErrorDisplay, LoadingSpinner};
use crate::components::icons::{ClockIcon, StarIcon};
use dioxus::prelude::*;
use whisker_common::{RecordCard, Region};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShelfKind {
    Recent,
    Popular,
}

impl ShelfKind {
    pub fn region(self) -> Region {
        match self {
            ShelfKind::Recent => Region::RecentShelf,
            ShelfKind::Popular => Region::PopularShelf,
        }
    }

    fn title(self) -> &'static str {
        match self {
            ShelfKind::Recent => "New this week",
            ShelfKind::Popular => "Popular",
        }
    }
}

/// One shelf of record cards. Loading and error states mirror the grid; a
/// loaded shelf with no cards is not rendered at all.
#[component]
pub fn Shelf(
    kind: ShelfKind,
    cards: Vec<RecordCard>,
    loading: bool,
    error: Option<String>,
    on_card_click: EventHandler<String>,
) -> Element {
    if !loading && error.is_none() && cards.is_empty() {
        return rsx! {};
    }

    rsx! {
        section {
            id: kind.region().id(),
            class: "flex flex-col gap-3",
            h2 { class: "flex items-center gap-2 text-xl font-bold text-white",
                match kind {
                    ShelfKind::Recent => rsx! {
                        ClockIcon { class: "w-5 h-5 text-amber-400" }
                    },
                    ShelfKind::Popular => rsx! {
                        StarIcon { class: "w-5 h-5 text-amber-400" }
                    },
                }
                "{kind.title()}"
            }
            if loading {
                LoadingSpinner { compact: true }
            } else if let Some(err) = error {
                ErrorDisplay { message: err }
            } else {
                div { class: "flex gap-4 overflow-x-auto pb-2",
                    for card in cards {
                        div { key: "{card.record_id}", class: "w-48 flex-shrink-0",
                            RecordCardView { card, on_click: on_card_click }
                        }
                    }
                }
            }
        }
    }
}
