//! Lightbox for one record: main media, thumbnail strip and the dismissal
//! gestures (close button, backdrop, Escape, horizontal swipe)

use crate::components::button::ChromelessButton;
use crate::components::icons::{ChevronLeftIcon, ChevronRightIcon, PlayIcon, XIcon};
use crate::components::modal::Modal;
use crate::components::routing::emit;
use crate::wasm_utils::viewport_width;
use dioxus::html::point_interaction::InteractionLocation;
use dioxus::prelude::*;
use whisker_common::{EventData, EventKind, GalleryAction, LightboxView, MediaItem, Region};

fn first_touch(evt: &TouchEvent) -> Option<(f64, f64)> {
    evt.data()
        .touches_changed()
        .first()
        .map(|touch| {
            let point = touch.client_coordinates();
            (point.x, point.y)
        })
}

/// Always rendered by the gallery; open whenever `view` is `Some`.
#[component]
pub fn Lightbox(view: Option<LightboxView>, on_action: EventHandler<GalleryAction>) -> Element {
    let is_open = view.is_some();

    let on_keydown = move |evt: KeyboardEvent| {
        let delta = match evt.key() {
            Key::ArrowLeft => -1,
            Key::ArrowRight => 1,
            _ => return,
        };
        emit(on_action, EventKind::KeyDown, Region::Modal, EventData::Step(delta));
    };

    rsx! {
        Modal {
            is_open,
            on_cancel: move |_| emit(on_action, EventKind::Cancel, Region::Modal, EventData::None),
            on_backdrop_click: move |_| {
                emit(on_action, EventKind::Click, Region::ModalBackdrop, EventData::None)
            },
            on_keydown,
            if let Some(view) = view {
                LightboxContent { view, on_action }
            }
        }
    }
}

#[component]
fn LightboxContent(view: LightboxView, on_action: EventHandler<GalleryAction>) -> Element {
    let can_prev = view.can_prev();
    let can_next = view.can_next();
    let media_key = format!("{}-{}", view.record_id, view.media_index);

    rsx! {
        div {
            class: "flex flex-col items-center max-w-[95vw]",
            "data-record-id": "{view.record_id}",

            ChromelessButton {
                id: Region::ModalClose.id().to_string(),
                class: Some("fixed top-4 right-4 text-gray-400 hover:text-white transition-colors z-10".to_string()),
                aria_label: Some("Close".to_string()),
                onclick: move |e: MouseEvent| {
                    e.stop_propagation();
                    emit(on_action, EventKind::Click, Region::ModalClose, EventData::None);
                },
                XIcon { class: "w-6 h-6" }
            }

            if can_prev {
                ChromelessButton {
                    id: Region::ModalPrev.id().to_string(),
                    class: Some(nav_button_class("left-4")),
                    title: Some("Previous (Left arrow)".to_string()),
                    aria_label: Some("Previous".to_string()),
                    onclick: move |_| emit(on_action, EventKind::Click, Region::ModalPrev, EventData::Step(-1)),
                    ChevronLeftIcon {
                        class: "w-8 h-8 text-gray-300 -translate-x-0.5",
                        stroke_width: "1.5",
                    }
                }
            }
            if can_next {
                ChromelessButton {
                    id: Region::ModalNext.id().to_string(),
                    class: Some(nav_button_class("right-4")),
                    title: Some("Next (Right arrow)".to_string()),
                    aria_label: Some("Next".to_string()),
                    onclick: move |_| emit(on_action, EventKind::Click, Region::ModalNext, EventData::Step(1)),
                    ChevronRightIcon {
                        class: "w-8 h-8 text-gray-300 translate-x-0.5",
                        stroke_width: "1.5",
                    }
                }
            }

            div {
                id: Region::ModalMedia.id(),
                class: "relative touch-pan-y",
                ontouchstart: move |evt: TouchEvent| {
                    if let Some((x, y)) = first_touch(&evt) {
                        emit(on_action, EventKind::TouchStart, Region::ModalMedia, EventData::Point { x, y });
                    }
                },
                ontouchend: move |evt: TouchEvent| {
                    if let Some((x, y)) = first_touch(&evt) {
                        let data = EventData::Release {
                            x,
                            y,
                            viewport_width: viewport_width(),
                        };
                        emit(on_action, EventKind::TouchEnd, Region::ModalMedia, data);
                    }
                },
                match view.current() {
                    Some(item) if item.is_video() => rsx! {
                        video {
                            key: "{media_key}",
                            src: "{item.url}",
                            class: "max-w-[90vw] max-h-[70vh] rounded-lg shadow-2xl",
                            controls: true,
                            autoplay: true,
                            playsinline: true,
                            // Starts muted so autoplay is permitted; unmuted once playing
                            muted: true,
                        }
                    },
                    Some(item) => rsx! {
                        img {
                            key: "{media_key}",
                            src: "{item.url}",
                            alt: "{view.title}",
                            class: "max-w-[90vw] max-h-[70vh] object-contain rounded-lg shadow-2xl",
                        }
                    },
                    None => rsx! {
                        div { class: "w-64 h-64 bg-gray-800 rounded-lg" }
                    },
                }
            }

            div { class: "mt-4 text-center max-w-2xl px-4",
                if !view.title.is_empty() {
                    h2 { class: "text-white text-lg font-semibold", "{view.title}" }
                }
                if !view.description.is_empty() {
                    p { class: "mt-1 text-gray-300 text-sm", "{view.description}" }
                }
                if view.show_thumbnails() {
                    p { class: "mt-2 text-gray-500 text-xs", "{view.counter()}" }
                }
            }

            if view.show_thumbnails() {
                div {
                    id: Region::ModalThumbnails.id(),
                    class: "mt-4 flex gap-2 overflow-x-auto max-w-[90vw] p-1",
                    for (i , item) in view.media.iter().enumerate() {
                        Thumbnail {
                            key: "{item.url}-{i}",
                            item: item.clone(),
                            is_active: i == view.media_index,
                            onclick: move |_| {
                                emit(on_action, EventKind::Click, Region::ModalThumbnails, EventData::Index(i))
                            },
                        }
                    }
                }
            }
        }
    }
}

fn nav_button_class(side: &str) -> String {
    format!("fixed {side} top-1/2 -translate-y-1/2 w-14 h-14 bg-gray-800/60 hover:bg-gray-700/80 rounded-full flex items-center justify-center transition-colors z-10")
}

#[component]
fn Thumbnail(item: MediaItem, is_active: bool, onclick: EventHandler<MouseEvent>) -> Element {
    let ring_class = if is_active {
        "ring-2 ring-white"
    } else {
        "ring-1 ring-gray-600 hover:ring-gray-500"
    };

    rsx! {
        ChromelessButton {
            class: Some(format!("relative flex-shrink-0 w-16 h-16 rounded-md {ring_class}")),
            aria_pressed: Some(is_active),
            onclick,
            div { class: "w-full h-full rounded-md overflow-clip",
                if item.is_video() {
                    video {
                        src: "{item.url}",
                        class: "w-full h-full object-cover",
                        muted: true,
                        preload: "metadata",
                    }
                    div { class: "absolute inset-0 flex items-center justify-center text-white/80",
                        PlayIcon { class: "w-5 h-5" }
                    }
                } else {
                    img {
                        src: "{item.url}",
                        alt: "",
                        class: "w-full h-full object-cover",
                        loading: "lazy",
                    }
                }
            }
        }
    }
}
