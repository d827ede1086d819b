//! Gallery UI components

pub mod button;
pub mod category_filter;
pub mod gallery;
pub mod gallery_card;
pub mod helpers;
pub mod icons;
pub mod lightbox;
pub mod modal;
pub mod routing;
pub mod segmented_control;
pub mod shelf;
pub mod text_input;

pub use button::{Button, ButtonVariant, ChromelessButton};
pub use category_filter::CategoryFilter;
pub use gallery::GalleryView;
pub use gallery_card::{Chips, ItemTileView, MediaPreview, RecordCardView};
pub use helpers::{ErrorDisplay, LoadingSpinner};
pub use icons::{ChevronLeftIcon, ChevronRightIcon, ClockIcon, ImageIcon, PlayIcon, SearchIcon, StarIcon, XIcon};
pub use lightbox::Lightbox;
pub use modal::Modal;
pub use routing::emit;
pub use segmented_control::{Segment, SegmentedControl, ViewModeControl};
pub use shelf::{Shelf, ShelfKind};
pub use text_input::{TextInput, TextInputSize};
