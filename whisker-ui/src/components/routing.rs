//! UI events become gallery actions through the subscription table

use dioxus::prelude::*;
use whisker_common::{EventData, EventKind, GalleryAction, Region};

/// Route `event` on `source` and pass the resulting action to `on_action`.
/// Events nothing is subscribed to are dropped.
pub fn emit(on_action: EventHandler<GalleryAction>, event: EventKind, source: Region, data: EventData) {
    if let Some(action) = GalleryAction::from_event(event, source, data) {
        on_action.call(action);
    }
}
