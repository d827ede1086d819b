//! Search-style text input

use crate::components::icons::SearchIcon;
use dioxus::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TextInputSize {
    Small,
    Medium,
}

/// Text input with a leading magnifier. `on_input` fires on every keystroke;
/// debouncing is the caller's business.
#[component]
pub fn TextInput(
    value: String,
    on_input: EventHandler<String>,
    size: TextInputSize,
    #[props(default)] placeholder: Option<&'static str>,
    #[props(default)] id: Option<String>,
    #[props(default)] aria_label: Option<&'static str>,
) -> Element {
    let padding = match size {
        TextInputSize::Small => "pl-8 pr-2.5 py-1.5 text-sm",
        TextInputSize::Medium => "pl-9 pr-3 py-2",
    };

    rsx! {
        div { class: "relative w-full",
            div { class: "absolute inset-y-0 left-2.5 flex items-center text-gray-500 pointer-events-none",
                SearchIcon { class: "w-4 h-4" }
            }
            input {
                r#type: "search",
                class: "w-full bg-gray-800/50 rounded-lg focus:outline-none focus:ring-1 focus:ring-amber-400/50 text-gray-300 placeholder-gray-500 {padding}",
                id: id.as_deref(),
                value: "{value}",
                placeholder,
                aria_label,
                autocomplete: "off",
                oninput: move |e| on_input.call(e.value()),
            }
        }
    }
}
