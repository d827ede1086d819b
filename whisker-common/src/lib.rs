//! whisker-common - the gallery engine
//!
//! Pure data transformations and state machines behind the cat gallery:
//! media normalization, the category index, filtering, view projections,
//! the lightbox controller and the session dispatcher that ties them
//! together. Nothing in here touches the DOM, so every behaviour can be
//! tested without a rendering surface.

pub mod categories;
pub mod config;
pub mod debounce;
pub mod events;
pub mod filter;
pub mod modal;
pub mod record;
pub mod render;
pub mod session;

pub use categories::{build_category_index, search_categories, CategoryEntry, CategoryListView};
pub use config::GalleryConfig;
pub use debounce::{DebounceTicket, Debouncer};
pub use events::{route, EventKind, Handler, Region, Subscription, SUBSCRIPTIONS};
pub use filter::{filter_records, FilterState, UnknownViewMode, ViewMode};
pub use modal::{
    is_dismiss_swipe, DismissReason, LightboxView, ModalController, ModalEffect, ModalState,
    SwipeTracker,
};
pub use record::{decode_rows, infer_media_type, resolve_media, MediaItem, MediaSource, MediaType, Record, RecordRow};
pub use render::{
    count_label, popular_shelf, recent_shelf, render_gallery, truncate, CategoryChips,
    GalleryUnit, GalleryView, ItemTile, RecordCard,
};
pub use session::{EventData, GalleryAction, GalleryEffect, GallerySession, LoadState, RegionState};
