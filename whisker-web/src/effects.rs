//! Runs the effects the gallery session asks for
//!
//! The session is pure; this runtime owns every handle it cannot hold:
//! the debounce timer task, the visibility observer, browser history and
//! the body scroll lock. It is `Copy` so event handlers and spawned tasks
//! can each carry one.

use crate::media::{self, VisibilityObserver, AUTOPLAY_SELECTOR};
use dioxus::prelude::*;
use wasm_bindgen_x::JsValue;
use whisker_common::{EventData, EventKind, GalleryAction, GalleryEffect, ModalEffect, Region};
use whisker_ui::stores::{GalleryState, GalleryStateStoreExt};
use whisker_ui::time::sleep_ms;
use whisker_ui::wasm_utils::EventListener;

/// History entry state for the lightbox checkpoint
const CHECKPOINT_STATE: &str = "whisker-lightbox";

/// `history.back()` calls whose `popstate` has not arrived yet. The event
/// is asynchronous, so without this a lightbox reopened in the meantime
/// would be closed by our own release.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct PendingPops(u32);

impl PendingPops {
    fn release(&mut self) {
        self.0 += 1;
    }

    /// True when this `popstate` answers one of our own releases.
    fn absorb(&mut self) -> bool {
        if self.0 == 0 {
            return false;
        }
        self.0 -= 1;
        true
    }
}

#[derive(Clone, Copy)]
pub struct EffectRuntime {
    store: Store<GalleryState>,
    search_task: Signal<Option<Task>>,
    observe_task: Signal<Option<Task>>,
    observer: Signal<Option<VisibilityObserver>>,
    /// Body `overflow` value from before the lock, restored on unlock
    saved_overflow: Signal<Option<String>>,
    pending_pops: Signal<PendingPops>,
}

impl EffectRuntime {
    /// Create inside a component; the signals belong to its scope.
    pub fn new(store: Store<GalleryState>) -> Self {
        Self {
            store,
            search_task: Signal::new(None),
            observe_task: Signal::new(None),
            observer: Signal::new(None),
            saved_overflow: Signal::new(None),
            pending_pops: Signal::new(PendingPops::default()),
        }
    }

    pub fn dispatch(self, action: GalleryAction) {
        let effects = self.store.session().write().dispatch(action);
        for effect in effects {
            self.apply(effect);
        }
    }

    fn apply(mut self, effect: GalleryEffect) {
        match effect {
            GalleryEffect::ScheduleSearch { ticket, delay_ms } => {
                self.cancel_search();
                let task = spawn(async move {
                    sleep_ms(delay_ms).await;
                    self.dispatch(GalleryAction::SearchSettled(ticket));
                });
                self.search_task.set(Some(task));
            }
            GalleryEffect::CancelSearch => self.cancel_search(),
            GalleryEffect::ObserveVideos { defer_ms } => {
                if let Some(task) = self.observe_task.take() {
                    task.cancel();
                }
                // Drop the old observer now; its elements are about to go away
                self.observer.set(None);
                let task = spawn(async move {
                    // Give the grid a moment to render before querying it
                    sleep_ms(defer_ms).await;
                    self.observer.set(VisibilityObserver::observe(AUTOPLAY_SELECTOR));
                });
                self.observe_task.set(Some(task));
            }
            GalleryEffect::Modal(effect) => self.apply_modal(effect),
        }
    }

    fn apply_modal(mut self, effect: ModalEffect) {
        match effect {
            ModalEffect::PushCheckpoint => {
                if let Some(history) = history() {
                    let _ = history.push_state(&JsValue::from_str(CHECKPOINT_STATE), "");
                }
            }
            ModalEffect::ReleaseCheckpoint => {
                if let Some(history) = history() {
                    if history.back().is_ok() {
                        self.pending_pops.write().release();
                    }
                }
            }
            ModalEffect::LockScroll => {
                let Some(style) = body_style() else {
                    return;
                };
                let previous = style.get_property_value("overflow").unwrap_or_default();
                self.saved_overflow.set(Some(previous));
                let _ = style.set_property("overflow", "hidden");
            }
            ModalEffect::UnlockScroll => self.unlock_scroll(),
            ModalEffect::PlayVideo => {
                // Peek: this can run inside an effect that must not subscribe
                let defer_ms = self.store.session().peek().config().observer_defer_ms;
                spawn(async move {
                    // The new video element is rendered after this dispatch returns
                    sleep_ms(defer_ms).await;
                    media::play_lightbox_video().await;
                });
            }
            ModalEffect::StopVideo => media::stop_lightbox_video(),
        }
    }

    fn cancel_search(mut self) {
        if let Some(task) = self.search_task.take() {
            task.cancel();
        }
    }

    fn unlock_scroll(mut self) {
        let Some(previous) = self.saved_overflow.take() else {
            return;
        };
        if let Some(style) = body_style() {
            let _ = if previous.is_empty() {
                style.remove_property("overflow").map(|_| ())
            } else {
                style.set_property("overflow", &previous)
            };
        }
    }

    /// Back navigation closes the lightbox; the platform has already popped
    /// the checkpoint. Pops caused by our own release are skipped.
    pub fn listen_back_navigation(mut self) -> Option<EventListener> {
        EventListener::window("popstate", move |_| {
            if self.pending_pops.write().absorb() {
                tracing::debug!("Ignoring popstate from released checkpoint");
                return;
            }
            if let Some(action) = GalleryAction::from_event(EventKind::PopState, Region::Window, EventData::None) {
                self.dispatch(action);
            }
        })
    }

    /// Release everything held on behalf of the page.
    pub fn teardown(mut self) {
        self.cancel_search();
        if let Some(task) = self.observe_task.take() {
            task.cancel();
        }
        self.observer.set(None);
        self.unlock_scroll();
    }
}

fn history() -> Option<web_sys_x::History> {
    web_sys_x::window()?.history().ok()
}

fn body_style() -> Option<web_sys_x::CssStyleDeclaration> {
    Some(web_sys_x::window()?.document()?.body()?.style())
}
