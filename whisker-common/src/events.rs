//! Event subscription table
//!
//! Every DOM event the gallery reacts to is listed here as an
//! (event, source region, handler) triple. The UI uses [`Region::id`] for its
//! element ids and turns each event into an action with
//! [`GalleryAction::from_event`](crate::session::GalleryAction::from_event),
//! which resolves the handler through [`route`].

/// Logical regions of the rendered surface, addressed by stable ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    SearchInput,
    ClearFilters,
    CategoryList,
    CategorySearch,
    ViewModeToggle,
    Grid,
    RecentShelf,
    PopularShelf,
    ResultCount,
    Modal,
    ModalBackdrop,
    ModalClose,
    ModalPrev,
    ModalNext,
    ModalThumbnails,
    ModalMedia,
    Window,
}

impl Region {
    pub const fn id(self) -> &'static str {
        match self {
            Region::SearchInput => "gallery-search",
            Region::ClearFilters => "gallery-clear-filters",
            Region::CategoryList => "category-list",
            Region::CategorySearch => "category-search",
            Region::ViewModeToggle => "view-mode",
            Region::Grid => "gallery-grid",
            Region::RecentShelf => "shelf-recent",
            Region::PopularShelf => "shelf-popular",
            Region::ResultCount => "result-count",
            Region::Modal => "lightbox",
            Region::ModalBackdrop => "lightbox-backdrop",
            Region::ModalClose => "lightbox-close",
            Region::ModalPrev => "lightbox-prev",
            Region::ModalNext => "lightbox-next",
            Region::ModalThumbnails => "lightbox-thumbnails",
            Region::ModalMedia => "lightbox-media",
            Region::Window => "window",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Input,
    Toggle,
    Select,
    Click,
    /// The `<dialog>` cancel event, fired by Escape
    Cancel,
    KeyDown,
    TouchStart,
    TouchEnd,
    PopState,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handler {
    UpdateSearch,
    ClearFilters,
    ToggleCategory,
    SearchCategories,
    SetViewMode,
    ActivateUnit,
    SelectThumbnail,
    StepMedia,
    CloseModal,
    BackdropClick,
    EscapeKey,
    SwipeStart,
    SwipeEnd,
    BackNavigation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Subscription {
    pub event: EventKind,
    pub source: Region,
    pub handler: Handler,
}

const fn sub(event: EventKind, source: Region, handler: Handler) -> Subscription {
    Subscription {
        event,
        source,
        handler,
    }
}

pub const SUBSCRIPTIONS: &[Subscription] = &[
    sub(EventKind::Input, Region::SearchInput, Handler::UpdateSearch),
    sub(EventKind::Click, Region::ClearFilters, Handler::ClearFilters),
    sub(EventKind::Toggle, Region::CategoryList, Handler::ToggleCategory),
    sub(EventKind::Input, Region::CategorySearch, Handler::SearchCategories),
    sub(EventKind::Select, Region::ViewModeToggle, Handler::SetViewMode),
    sub(EventKind::Click, Region::Grid, Handler::ActivateUnit),
    sub(EventKind::Click, Region::RecentShelf, Handler::ActivateUnit),
    sub(EventKind::Click, Region::PopularShelf, Handler::ActivateUnit),
    sub(EventKind::Click, Region::ModalThumbnails, Handler::SelectThumbnail),
    sub(EventKind::KeyDown, Region::Modal, Handler::StepMedia),
    sub(EventKind::Click, Region::ModalPrev, Handler::StepMedia),
    sub(EventKind::Click, Region::ModalNext, Handler::StepMedia),
    sub(EventKind::Click, Region::ModalClose, Handler::CloseModal),
    sub(EventKind::Click, Region::ModalBackdrop, Handler::BackdropClick),
    sub(EventKind::Cancel, Region::Modal, Handler::EscapeKey),
    sub(EventKind::TouchStart, Region::ModalMedia, Handler::SwipeStart),
    sub(EventKind::TouchEnd, Region::ModalMedia, Handler::SwipeEnd),
    sub(EventKind::PopState, Region::Window, Handler::BackNavigation),
];

/// Look up the handler subscribed to `event` on `source`.
pub fn route(event: EventKind, source: Region) -> Option<Handler> {
    SUBSCRIPTIONS
        .iter()
        .find(|s| s.event == event && s.source == source)
        .map(|s| s.handler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_each_event_source_pair_is_unique() {
        let mut seen = HashSet::new();
        for s in SUBSCRIPTIONS {
            assert!(seen.insert((s.event, s.source)), "duplicate subscription {s:?}");
        }
    }

    #[test]
    fn test_region_ids_are_unique() {
        let ids: HashSet<&str> = SUBSCRIPTIONS.iter().map(|s| s.source.id()).collect();
        let regions: HashSet<Region> = SUBSCRIPTIONS.iter().map(|s| s.source).collect();
        assert_eq!(ids.len(), regions.len());
    }

    #[test]
    fn test_route_lookup() {
        assert_eq!(route(EventKind::Cancel, Region::Modal), Some(Handler::EscapeKey));
        assert_eq!(route(EventKind::PopState, Region::Window), Some(Handler::BackNavigation));
        assert_eq!(route(EventKind::Input, Region::Grid), None);
    }

    #[test]
    fn test_every_dismissal_path_is_wired() {
        for handler in [
            Handler::CloseModal,
            Handler::BackdropClick,
            Handler::EscapeKey,
            Handler::SwipeEnd,
            Handler::BackNavigation,
        ] {
            assert!(SUBSCRIPTIONS.iter().any(|s| s.handler == handler), "{handler:?} unwired");
        }
    }

    #[test]
    fn test_modal_media_takes_only_touches() {
        assert_eq!(route(EventKind::TouchStart, Region::ModalMedia), Some(Handler::SwipeStart));
        assert_eq!(route(EventKind::TouchEnd, Region::ModalMedia), Some(Handler::SwipeEnd));
        assert_eq!(route(EventKind::Click, Region::ModalMedia), None);
    }
}
