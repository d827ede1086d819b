//! whisker-ui - Dioxus components for the cat gallery
//!
//! Pure view components driven by a [`stores::GalleryState`] store and an
//! action callback. Nothing here fetches data or touches browser history;
//! the web crate owns those side effects.

pub mod components;
pub mod stores;
pub mod time;
pub mod wasm_utils;

pub use components::*;
