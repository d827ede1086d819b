//! Segmented control: a group of toggle buttons where one is selected

use crate::components::button::{Button, ButtonVariant};
use dioxus::prelude::*;
use whisker_common::{Region, ViewMode};

#[derive(Clone, PartialEq)]
pub struct Segment {
    pub label: &'static str,
    pub value: &'static str,
}

impl Segment {
    pub fn new(label: &'static str, value: &'static str) -> Self {
        Self { label, value }
    }
}

#[component]
pub fn SegmentedControl(
    segments: Vec<Segment>,
    selected: String,
    on_select: EventHandler<&'static str>,
    #[props(default)] id: Option<String>,
    #[props(default)] aria_label: Option<&'static str>,
) -> Element {
    rsx! {
        div {
            class: "flex gap-1 bg-gray-800/50 rounded-lg p-1",
            id: id.as_deref(),
            role: "group",
            aria_label,
            for segment in &segments {
                Button {
                    key: "{segment.value}",
                    variant: if segment.value == selected { ButtonVariant::Primary } else { ButtonVariant::Ghost },
                    aria_pressed: Some(segment.value == selected),
                    onclick: {
                        let value = segment.value;
                        move |_| on_select.call(value)
                    },
                    "{segment.label}"
                }
            }
        }
    }
}

fn view_mode_segments() -> Vec<Segment> {
    vec![
        Segment::new("By cat", ViewMode::Grouped.as_str()),
        Segment::new("All photos", ViewMode::PerItem.as_str()),
    ]
}

/// Grouped / per-item switch.
#[component]
pub fn ViewModeControl(selected: ViewMode, on_change: EventHandler<ViewMode>) -> Element {
    let segments = view_mode_segments();

    rsx! {
        SegmentedControl {
            segments,
            selected: selected.as_str().to_string(),
            id: Region::ViewModeToggle.id().to_string(),
            aria_label: "View mode",
            on_select: move |value: &'static str| {
                match value.parse::<ViewMode>() {
                    Ok(mode) => on_change.call(mode),
                    Err(e) => tracing::warn!("{e}"),
                }
            },
        }
    }
}
