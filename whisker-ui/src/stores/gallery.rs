//! Gallery state store

use dioxus::prelude::*;
use whisker_common::{GalleryConfig, GallerySession};

/// State for the gallery page
#[derive(Clone, Debug, Default, PartialEq, Store)]
pub struct GalleryState {
    /// Records, filters and lightbox for this page load
    pub session: GallerySession,
}

impl GalleryState {
    pub fn with_config(config: GalleryConfig) -> Self {
        Self {
            session: GallerySession::new(config),
        }
    }
}
