//! whisker-web - the cat gallery web app
//!
//! Routes, the record store client, configuration and the runtime that
//! carries out the gallery session's effects in the browser.

pub mod api;
pub mod config;
pub mod effects;
pub mod media;
pub mod pages;

use dioxus::prelude::*;
use pages::{AppLayout, CatDetail, Gallery, GalleryShell};

pub const MAIN_CSS: Asset = asset!("/assets/main.css");

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(AppLayout)]
    #[layout(GalleryShell)]
    #[route("/")]
    Gallery {},
    #[route("/cat/:id")]
    CatDetail { id: String },
    #[end_layout]
    #[end_layout]
}

#[component]
pub fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        Router::<Route> {}
    }
}
