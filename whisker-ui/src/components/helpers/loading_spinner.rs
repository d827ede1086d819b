//! Loading spinner component

use dioxus::prelude::*;

/// Loading spinner with optional message
#[component]
pub fn LoadingSpinner(
    #[props(default = "Loading cats...".to_string())] message: String,
    #[props(default)] compact: bool,
) -> Element {
    let (padding, size) = if compact {
        ("py-4", "h-6 w-6")
    } else {
        ("py-12", "h-12 w-12")
    };

    rsx! {
        div {
            class: "flex justify-center items-center {padding}",
            role: "status",
            div { class: "animate-spin rounded-full {size} border-b-2 border-amber-400" }
            p { class: "ml-4 text-gray-300", "{message}" }
        }
    }
}
