//! Grid units: one card per record, or one tile per media item

use crate::components::icons::{ImageIcon, PlayIcon};
use dioxus::prelude::*;
use whisker_common::{CategoryChips, ItemTile, MediaItem, RecordCard};

const CARD_CLASS: &str = "bg-gray-800 rounded-lg overflow-hidden shadow-lg hover:shadow-xl transition-shadow duration-300 cursor-pointer group relative text-left w-full";

/// Grid preview of a media item. Videos are muted loops handed to the
/// visibility observer via `data-autoplay`.
#[component]
pub fn MediaPreview(item: MediaItem, alt: String) -> Element {
    if item.is_video() {
        rsx! {
            video {
                class: "w-full h-full object-cover",
                src: "{item.url}",
                "data-autoplay": "true",
                muted: true,
                r#loop: true,
                playsinline: true,
                preload: "metadata",
            }
            div { class: "absolute top-2 left-2 bg-black/60 rounded-full p-1.5 text-white",
                PlayIcon { class: "w-3 h-3" }
            }
        }
    } else {
        rsx! {
            img {
                src: "{item.url}",
                alt: "{alt}",
                class: "w-full h-full object-cover",
                loading: "lazy",
            }
        }
    }
}

#[component]
pub fn Chips(chips: CategoryChips) -> Element {
    if chips.is_empty() {
        return rsx! {};
    }

    rsx! {
        div { class: "flex flex-wrap gap-1 mt-2",
            for name in chips.visible.iter() {
                span {
                    key: "{name}",
                    class: "px-2 py-0.5 rounded-full bg-gray-700 text-gray-300 text-xs",
                    "{name}"
                }
            }
            if chips.overflow > 0 {
                span { class: "px-2 py-0.5 rounded-full bg-gray-700/50 text-gray-400 text-xs",
                    "+{chips.overflow}"
                }
            }
        }
    }
}

/// Grouped-mode card. Clicking opens the lightbox on the record's first item.
#[component]
pub fn RecordCardView(card: RecordCard, on_click: EventHandler<String>) -> Element {
    let record_id = card.record_id.clone();

    rsx! {
        button {
            r#type: "button",
            class: CARD_CLASS,
            "data-record-id": "{card.record_id}",
            onclick: move |_| on_click.call(record_id.clone()),
            div { class: "aspect-square bg-gray-700 flex items-center justify-center relative",
                match &card.cover {
                    Some(cover) => rsx! {
                        MediaPreview { item: cover.clone(), alt: card.title.clone() }
                    },
                    None => rsx! {
                        ImageIcon { class: "w-12 h-12 text-gray-500" }
                    },
                }
                if card.extra_media > 0 {
                    span { class: "absolute top-2 right-2 bg-black/70 text-white text-xs font-semibold rounded-full px-2 py-0.5",
                        "+{card.extra_media}"
                    }
                }
            }
            div { class: "p-4",
                h3 {
                    class: "font-bold text-white text-lg mb-1 truncate",
                    title: "{card.title}",
                    "{card.title}"
                }
                if !card.description.is_empty() {
                    p { class: "text-gray-400 text-sm", "{card.description}" }
                }
                Chips { chips: card.chips.clone() }
            }
        }
    }
}

/// Per-item-mode tile. Clicking opens the lightbox at this item.
#[component]
pub fn ItemTileView(tile: ItemTile, on_click: EventHandler<(String, usize)>) -> Element {
    let target = (tile.record_id.clone(), tile.media_index);

    rsx! {
        button {
            r#type: "button",
            class: CARD_CLASS,
            "data-record-id": "{tile.record_id}",
            "data-media-index": "{tile.media_index}",
            onclick: move |_| on_click.call(target.clone()),
            div { class: "aspect-square bg-gray-700 relative",
                MediaPreview { item: tile.media.clone(), alt: tile.title.clone() }
            }
            div { class: "p-3",
                if !tile.title.is_empty() {
                    h3 { class: "font-semibold text-white mb-1 truncate", "{tile.title}" }
                }
                if !tile.description.is_empty() {
                    p { class: "text-gray-400 text-xs", "{tile.description}" }
                }
                Chips { chips: tile.chips.clone() }
            }
        }
    }
}
