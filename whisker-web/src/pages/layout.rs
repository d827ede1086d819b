use crate::Route;
use dioxus::prelude::*;

#[component]
pub fn AppLayout() -> Element {
    rsx! {
        div { class: "min-h-screen bg-gray-900 text-gray-100 flex flex-col",
            nav { class: "border-b border-gray-800 px-4 py-3",
                Link { class: "text-amber-400 font-semibold", to: Route::Gallery {}, "whisker" }
            }
            Outlet::<Route> {}
        }
    }
}
