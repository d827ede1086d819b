//! Gallery session: the single owner of filter, category-search and
//! lightbox state for one page load
//!
//! UI events become [`GalleryAction`]s; `dispatch` applies them and hands
//! back the [`GalleryEffect`]s the host has to carry out (timers, history,
//! media playback). All views are derived from the session on demand.

use crate::categories::{build_category_index, search_categories, CategoryEntry, CategoryListView};
use crate::config::GalleryConfig;
use crate::debounce::{DebounceTicket, Debouncer};
use crate::events::{route, EventKind, Handler, Region};
use crate::filter::{FilterState, ViewMode};
use crate::modal::{DismissReason, LightboxView, ModalController, ModalEffect, ModalState, SwipeTracker};
use crate::record::Record;
use crate::render::{popular_shelf, recent_shelf, render_gallery, GalleryView, RecordCard};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

/// Progress of the one collection fetch per page load.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded,
    Failed(String),
}

/// What a UI event carried, before the subscription table decides which
/// action it becomes.
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    None,
    Text(String),
    ViewMode(ViewMode),
    Record(String),
    Item { record_id: String, media_index: usize },
    Index(usize),
    Step(isize),
    Point { x: f64, y: f64 },
    Release { x: f64, y: f64, viewport_width: f64 },
}

/// A region that is either waiting on the collection fetch, showing its
/// failure, or ready with content.
#[derive(Clone, Debug, PartialEq)]
pub enum RegionState<T> {
    Loading,
    Failed(String),
    Ready(T),
}

#[derive(Clone, Debug, PartialEq)]
pub enum GalleryAction {
    RecordsLoaded(Vec<Record>),
    LoadFailed(String),
    /// Raw keystroke in the search box
    SearchInput(String),
    /// The debounce timer for `ticket` elapsed
    SearchSettled(DebounceTicket),
    ClearFilters,
    ToggleCategory(String),
    CategoryQuery(String),
    SetViewMode(ViewMode),
    ActivateRecord {
        record_id: String,
    },
    ActivateItem {
        record_id: String,
        media_index: usize,
    },
    SelectThumbnail(usize),
    StepMedia(isize),
    Dismiss(DismissReason),
    BackdropClick {
        target_is_backdrop: bool,
    },
    SwipeStart {
        x: f64,
        y: f64,
    },
    SwipeEnd {
        x: f64,
        y: f64,
        viewport_width: f64,
    },
}

impl GalleryAction {
    /// Route `event` on `source` through the subscription table and build
    /// the action its handler stands for. `None` when nothing is subscribed
    /// or the payload does not fit the handler.
    pub fn from_event(event: EventKind, source: Region, data: EventData) -> Option<Self> {
        let Some(handler) = route(event, source) else {
            debug!("No subscription for {event:?} on {source:?}");
            return None;
        };

        let action = match (handler, data) {
            (Handler::UpdateSearch, EventData::Text(text)) => GalleryAction::SearchInput(text),
            (Handler::ClearFilters, EventData::None) => GalleryAction::ClearFilters,
            (Handler::ToggleCategory, EventData::Text(name)) => GalleryAction::ToggleCategory(name),
            (Handler::SearchCategories, EventData::Text(query)) => GalleryAction::CategoryQuery(query),
            (Handler::SetViewMode, EventData::ViewMode(mode)) => GalleryAction::SetViewMode(mode),
            (Handler::ActivateUnit, EventData::Record(record_id)) => GalleryAction::ActivateRecord { record_id },
            (
                Handler::ActivateUnit,
                EventData::Item {
                    record_id,
                    media_index,
                },
            ) => GalleryAction::ActivateItem {
                record_id,
                media_index,
            },
            (Handler::SelectThumbnail, EventData::Index(index)) => GalleryAction::SelectThumbnail(index),
            (Handler::StepMedia, EventData::Step(delta)) => GalleryAction::StepMedia(delta),
            (Handler::CloseModal, EventData::None) => GalleryAction::Dismiss(DismissReason::CloseButton),
            (Handler::BackdropClick, EventData::None) => GalleryAction::BackdropClick {
                target_is_backdrop: true,
            },
            (Handler::EscapeKey, EventData::None) => GalleryAction::Dismiss(DismissReason::Escape),
            (Handler::SwipeStart, EventData::Point { x, y }) => GalleryAction::SwipeStart { x, y },
            (
                Handler::SwipeEnd,
                EventData::Release {
                    x,
                    y,
                    viewport_width,
                },
            ) => GalleryAction::SwipeEnd {
                x,
                y,
                viewport_width,
            },
            (Handler::BackNavigation, EventData::None) => GalleryAction::Dismiss(DismissReason::BackNavigation),
            (handler, data) => {
                warn!("{handler:?} cannot take {data:?}");
                return None;
            }
        };
        Some(action)
    }

    /// The subscription-table handler this action is raised by, or `None` for
    /// actions that do not originate from a DOM event.
    pub fn handler(&self) -> Option<Handler> {
        let handler = match self {
            GalleryAction::RecordsLoaded(_)
            | GalleryAction::LoadFailed(_)
            | GalleryAction::SearchSettled(_) => return None,
            GalleryAction::SearchInput(_) => Handler::UpdateSearch,
            GalleryAction::ClearFilters => Handler::ClearFilters,
            GalleryAction::ToggleCategory(_) => Handler::ToggleCategory,
            GalleryAction::CategoryQuery(_) => Handler::SearchCategories,
            GalleryAction::SetViewMode(_) => Handler::SetViewMode,
            GalleryAction::ActivateRecord { .. } | GalleryAction::ActivateItem { .. } => {
                Handler::ActivateUnit
            }
            GalleryAction::SelectThumbnail(_) => Handler::SelectThumbnail,
            GalleryAction::StepMedia(_) => Handler::StepMedia,
            GalleryAction::Dismiss(reason) => match reason {
                DismissReason::CloseButton => Handler::CloseModal,
                DismissReason::Backdrop => Handler::BackdropClick,
                DismissReason::Escape => Handler::EscapeKey,
                DismissReason::Swipe => Handler::SwipeEnd,
                DismissReason::BackNavigation => Handler::BackNavigation,
            },
            GalleryAction::BackdropClick { .. } => Handler::BackdropClick,
            GalleryAction::SwipeStart { .. } => Handler::SwipeStart,
            GalleryAction::SwipeEnd { .. } => Handler::SwipeEnd,
        };
        Some(handler)
    }
}

/// Work the host carries out after a dispatch.
#[derive(Clone, Debug, PartialEq)]
pub enum GalleryEffect {
    /// Cancel any running search timer and start a new one that dispatches
    /// `SearchSettled(ticket)` after `delay_ms`
    ScheduleSearch { ticket: DebounceTicket, delay_ms: u64 },
    CancelSearch,
    /// The grid changed; re-register video elements after `defer_ms`
    ObserveVideos { defer_ms: u64 },
    Modal(ModalEffect),
}

#[derive(Clone, Debug, PartialEq)]
pub struct GallerySession {
    config: GalleryConfig,
    load: LoadState,
    records: Vec<Record>,
    categories: Vec<CategoryEntry>,
    filter: FilterState,
    search_input: String,
    category_query: String,
    debouncer: Debouncer,
    modal: ModalController,
    swipe: SwipeTracker,
    /// Record asked for before the collection arrived
    pending_record: Option<String>,
}

impl Default for GallerySession {
    fn default() -> Self {
        Self::new(GalleryConfig::default())
    }
}

impl GallerySession {
    pub fn new(config: GalleryConfig) -> Self {
        Self {
            debouncer: Debouncer::new(config.search_debounce_ms),
            config,
            load: LoadState::Loading,
            records: Vec::new(),
            categories: Vec::new(),
            filter: FilterState::new(),
            search_input: String::new(),
            category_query: String::new(),
            modal: ModalController::new(),
            swipe: SwipeTracker::default(),
            pending_record: None,
        }
    }

    pub fn dispatch(&mut self, action: GalleryAction) -> Vec<GalleryEffect> {
        match action {
            GalleryAction::RecordsLoaded(records) => {
                info!("Loaded {} records", records.len());
                self.categories = build_category_index(&records);
                self.records = records;
                self.load = LoadState::Loaded;
                let mut effects = vec![self.observe_videos()];
                if let Some(record_id) = self.pending_record.take() {
                    effects.extend(wrap(self.modal.open(&self.records, &record_id, 0)));
                }
                effects
            }
            GalleryAction::LoadFailed(message) => {
                warn!("Failed to load records: {message}");
                self.records.clear();
                self.categories.clear();
                self.load = LoadState::Failed(message);
                self.pending_record = None;
                Vec::new()
            }
            GalleryAction::SearchInput(text) => {
                self.search_input = text.clone();
                let ticket = self.debouncer.schedule(text);
                vec![GalleryEffect::ScheduleSearch {
                    ticket,
                    delay_ms: self.debouncer.delay_ms(),
                }]
            }
            GalleryAction::SearchSettled(ticket) => match self.debouncer.settle(ticket) {
                Some(term) if term != self.filter.search_term() => {
                    debug!("Search settled on {term:?}");
                    self.filter.set_search_term(term);
                    vec![self.observe_videos()]
                }
                _ => Vec::new(),
            },
            GalleryAction::ClearFilters => {
                self.filter.clear();
                self.search_input.clear();
                let mut effects = Vec::with_capacity(2);
                if self.debouncer.is_pending() {
                    effects.push(GalleryEffect::CancelSearch);
                }
                self.debouncer.cancel();
                effects.push(self.observe_videos());
                effects
            }
            GalleryAction::ToggleCategory(name) => {
                self.filter.toggle_category(&name);
                vec![self.observe_videos()]
            }
            GalleryAction::CategoryQuery(query) => {
                self.category_query = query;
                Vec::new()
            }
            GalleryAction::SetViewMode(mode) => {
                if mode == self.filter.view_mode() {
                    return Vec::new();
                }
                self.filter.set_view_mode(mode);
                vec![self.observe_videos()]
            }
            GalleryAction::ActivateRecord { record_id } => {
                if self.load == LoadState::Loading {
                    debug!("Holding activation of {record_id} until records load");
                    self.pending_record = Some(record_id);
                    return Vec::new();
                }
                let effects = self.modal.open(&self.records, &record_id, 0);
                wrap(effects)
            }
            GalleryAction::ActivateItem {
                record_id,
                media_index,
            } => {
                let effects = self.modal.open(&self.records, &record_id, media_index);
                wrap(effects)
            }
            GalleryAction::SelectThumbnail(index) => wrap(self.modal.select(&self.records, index)),
            GalleryAction::StepMedia(delta) => wrap(self.modal.step(&self.records, delta)),
            GalleryAction::Dismiss(reason) => {
                self.swipe = SwipeTracker::default();
                wrap(self.modal.dismiss(&self.records, reason))
            }
            GalleryAction::BackdropClick { target_is_backdrop } => {
                wrap(self.modal.backdrop_click(&self.records, target_is_backdrop))
            }
            GalleryAction::SwipeStart { x, y } => {
                if self.modal.is_open() {
                    self.swipe.start(x, y);
                }
                Vec::new()
            }
            GalleryAction::SwipeEnd {
                x,
                y,
                viewport_width,
            } => {
                if self.swipe.end(x, y, viewport_width, &self.config) {
                    wrap(self.modal.dismiss(&self.records, DismissReason::Swipe))
                } else {
                    Vec::new()
                }
            }
        }
    }

    fn observe_videos(&self) -> GalleryEffect {
        GalleryEffect::ObserveVideos {
            defer_ms: self.config.observer_defer_ms,
        }
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn is_loading(&self) -> bool {
        self.load == LoadState::Loading
    }

    pub fn load_error(&self) -> Option<&str> {
        match &self.load {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn categories(&self) -> &[CategoryEntry] {
        &self.categories
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// What is typed in the search box, which may be ahead of the settled term.
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn category_query(&self) -> &str {
        &self.category_query
    }

    pub fn visible_records(&self) -> Vec<&Record> {
        self.filter.apply(&self.records)
    }

    pub fn gallery(&self) -> GalleryView {
        render_gallery(&self.visible_records(), self.filter.view_mode(), &self.config)
    }

    pub fn category_list(&self) -> CategoryListView {
        search_categories(&self.categories, &self.category_query)
    }

    /// The category checklist, or the fetch's progress while it has none.
    pub fn category_panel(&self) -> RegionState<CategoryListView> {
        match &self.load {
            LoadState::Loading => RegionState::Loading,
            LoadState::Failed(message) => RegionState::Failed(message.clone()),
            LoadState::Loaded => RegionState::Ready(self.category_list()),
        }
    }

    pub fn recent(&self, now: DateTime<Utc>) -> Vec<RecordCard> {
        recent_shelf(&self.records, now, &self.config)
    }

    pub fn popular(&self) -> Vec<RecordCard> {
        popular_shelf(&self.records, &self.config)
    }

    pub fn modal_state(&self) -> &ModalState {
        self.modal.state()
    }

    pub fn lightbox(&self) -> Option<LightboxView> {
        self.modal.view(&self.records)
    }
}

fn wrap(effects: Vec<ModalEffect>) -> Vec<GalleryEffect> {
    effects.into_iter().map(GalleryEffect::Modal).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Subscription, SUBSCRIPTIONS};
    use crate::record::MediaItem;

    fn record(id: &str, categories: &[&str]) -> Record {
        Record {
            id: id.into(),
            title: Some(format!("Cat {id}")),
            description: None,
            media: vec![MediaItem::image(format!("https://cdn/{id}.jpg"))],
            categories: categories.iter().map(|c| c.to_string()).collect(),
            is_featured: false,
            created_at: None,
        }
    }

    fn loaded(records: Vec<Record>) -> GallerySession {
        let mut session = GallerySession::default();
        session.dispatch(GalleryAction::RecordsLoaded(records));
        session
    }

    #[test]
    fn test_starts_loading_in_grouped_mode() {
        let session = GallerySession::default();
        assert!(session.is_loading());
        assert_eq!(session.filter().view_mode(), ViewMode::Grouped);
        assert_eq!(session.modal_state(), &ModalState::Closed);
    }

    #[test]
    fn test_load_failure_empties_everything() {
        let mut session = loaded(vec![record("a", &["Tabby"])]);
        session.dispatch(GalleryAction::LoadFailed("boom".into()));
        assert_eq!(session.load_error(), Some("boom"));
        assert!(session.gallery().is_empty());
        assert!(session.popular().is_empty());
        assert_eq!(session.category_list(), CategoryListView::NoCategories);
    }

    #[test]
    fn test_search_applies_only_after_settle() {
        let mut session = loaded(vec![record("a", &[]), record("b", &[])]);
        let effects = session.dispatch(GalleryAction::SearchInput("cat a".into()));
        let ticket = match effects.as_slice() {
            [GalleryEffect::ScheduleSearch { ticket, delay_ms: 300 }] => *ticket,
            other => panic!("Expected ScheduleSearch, got {other:?}"),
        };
        assert_eq!(session.search_input(), "cat a");
        assert_eq!(session.gallery().count, 2);

        session.dispatch(GalleryAction::SearchSettled(ticket));
        assert_eq!(session.gallery().count, 1);
    }

    #[test]
    fn test_category_toggle_refilters_immediately() {
        let mut session = loaded(vec![record("a", &["Tabby"]), record("b", &[])]);
        session.dispatch(GalleryAction::ToggleCategory("Tabby".into()));
        assert_eq!(session.gallery().label, "1 cat");
    }

    #[test]
    fn test_every_dom_action_is_in_subscription_table() {
        let actions = vec![
            GalleryAction::SearchInput(String::new()),
            GalleryAction::ClearFilters,
            GalleryAction::ToggleCategory(String::new()),
            GalleryAction::CategoryQuery(String::new()),
            GalleryAction::SetViewMode(ViewMode::PerItem),
            GalleryAction::ActivateRecord { record_id: String::new() },
            GalleryAction::SelectThumbnail(0),
            GalleryAction::StepMedia(1),
            GalleryAction::Dismiss(DismissReason::Escape),
            GalleryAction::Dismiss(DismissReason::BackNavigation),
            GalleryAction::BackdropClick { target_is_backdrop: true },
            GalleryAction::SwipeStart { x: 0.0, y: 0.0 },
        ];
        for action in actions {
            let handler = action.handler().expect("DOM action has a handler");
            assert!(
                SUBSCRIPTIONS.iter().any(|s| s.handler == handler),
                "{handler:?} missing from table"
            );
        }
        assert_eq!(GalleryAction::RecordsLoaded(vec![]).handler(), None);
    }

    fn sample_data(handler: Handler) -> EventData {
        match handler {
            Handler::UpdateSearch | Handler::ToggleCategory | Handler::SearchCategories => {
                EventData::Text("Tabby".into())
            }
            Handler::SetViewMode => EventData::ViewMode(ViewMode::PerItem),
            Handler::ActivateUnit => EventData::Record("a".into()),
            Handler::SelectThumbnail => EventData::Index(1),
            Handler::StepMedia => EventData::Step(-1),
            Handler::SwipeStart => EventData::Point { x: 1.0, y: 2.0 },
            Handler::SwipeEnd => EventData::Release {
                x: 1.0,
                y: 2.0,
                viewport_width: 400.0,
            },
            Handler::ClearFilters
            | Handler::CloseModal
            | Handler::BackdropClick
            | Handler::EscapeKey
            | Handler::BackNavigation => EventData::None,
        }
    }

    #[test]
    fn test_every_subscription_builds_its_own_action() {
        for &Subscription { event, source, handler } in SUBSCRIPTIONS {
            let action = GalleryAction::from_event(event, source, sample_data(handler))
                .unwrap_or_else(|| panic!("Expected an action for {event:?} on {source:?}"));
            assert_eq!(action.handler(), Some(handler), "{event:?} on {source:?}");
        }
    }

    #[test]
    fn test_item_activation_from_grid() {
        let action = GalleryAction::from_event(
            EventKind::Click,
            Region::Grid,
            EventData::Item {
                record_id: "a".into(),
                media_index: 2,
            },
        );
        assert_eq!(
            action,
            Some(GalleryAction::ActivateItem {
                record_id: "a".into(),
                media_index: 2
            })
        );
    }

    #[test]
    fn test_unsubscribed_or_mismatched_events_build_nothing() {
        assert_eq!(
            GalleryAction::from_event(EventKind::Input, Region::Grid, EventData::Text("x".into())),
            None
        );
        assert_eq!(
            GalleryAction::from_event(EventKind::Click, Region::ModalClose, EventData::Index(0)),
            None
        );
    }

    #[test]
    fn test_category_panel_follows_load_state() {
        let mut session = GallerySession::default();
        assert_eq!(session.category_panel(), RegionState::Loading);

        session.dispatch(GalleryAction::LoadFailed("offline".into()));
        assert_eq!(session.category_panel(), RegionState::Failed("offline".into()));

        let session = loaded(vec![record("a", &[])]);
        assert_eq!(
            session.category_panel(),
            RegionState::Ready(CategoryListView::NoCategories)
        );
    }

    #[test]
    fn test_activation_before_load_opens_once_loaded() {
        let mut session = GallerySession::default();
        assert!(session
            .dispatch(GalleryAction::ActivateRecord { record_id: "b".into() })
            .is_empty());
        assert_eq!(session.modal_state(), &ModalState::Closed);

        let effects = session.dispatch(GalleryAction::RecordsLoaded(vec![record("a", &[]), record("b", &[])]));
        assert!(effects.contains(&GalleryEffect::Modal(ModalEffect::PushCheckpoint)));
        assert_eq!(
            session.modal_state(),
            &ModalState::Open {
                record_id: "b".into(),
                media_index: 0
            }
        );
    }

    #[test]
    fn test_route_activation_moves_between_records() {
        let mut session = loaded(vec![record("a", &[]), record("b", &[])]);
        session.dispatch(GalleryAction::ActivateRecord { record_id: "a".into() });
        session.dispatch(GalleryAction::ActivateRecord { record_id: "b".into() });
        assert_eq!(
            session.modal_state(),
            &ModalState::Open {
                record_id: "b".into(),
                media_index: 0
            }
        );
    }
}
