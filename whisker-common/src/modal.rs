//! Lightbox state machine
//!
//! `Closed` ⇄ `Open { record_id, media_index }`. Transitions return the side
//! effects the host must perform (history checkpoint, scroll lock, media
//! playback) instead of performing them, which keeps the controller free of
//! any DOM handle.

use crate::config::GalleryConfig;
use crate::record::{MediaItem, Record};
use crate::render::item_override;
use tracing::debug;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Open {
        record_id: String,
        media_index: usize,
    },
}

/// Why the lightbox is being dismissed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DismissReason {
    CloseButton,
    Backdrop,
    Escape,
    Swipe,
    /// The platform already consumed the history checkpoint
    BackNavigation,
}

/// Work the host performs after a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalEffect {
    /// Push a history entry so "back" closes the lightbox
    PushCheckpoint,
    /// Pop the history entry pushed on open
    ReleaseCheckpoint,
    LockScroll,
    UnlockScroll,
    /// Autoplay the main video, unmuted
    PlayVideo,
    /// Mute and pause the main video
    StopVideo,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModalController {
    state: ModalState,
    checkpoint_pushed: bool,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open { .. })
    }

    /// Open `record_id` at `media_index`. Unknown ids leave the state alone.
    ///
    /// Opening while already open switches records in place: the running
    /// video stops but no second checkpoint is pushed.
    pub fn open(&mut self, records: &[Record], record_id: &str, media_index: usize) -> Vec<ModalEffect> {
        let Some(record) = records.iter().find(|r| r.id == record_id) else {
            debug!("Ignoring lightbox activation for unknown record {record_id}");
            return Vec::new();
        };

        let mut effects = Vec::new();
        if self.is_open() {
            if self.current_is_video(records) {
                effects.push(ModalEffect::StopVideo);
            }
        } else {
            effects.push(ModalEffect::LockScroll);
        }
        if !self.checkpoint_pushed {
            effects.push(ModalEffect::PushCheckpoint);
            self.checkpoint_pushed = true;
        }

        let media_index = clamp_index(media_index, record.media.len());
        debug!("Opening lightbox on {record_id} at {media_index}");
        self.state = ModalState::Open {
            record_id: record.id.clone(),
            media_index,
        };

        if self.current_is_video(records) {
            effects.push(ModalEffect::PlayVideo);
        }
        effects
    }

    /// Switch the main media to another item of the open record.
    pub fn select(&mut self, records: &[Record], media_index: usize) -> Vec<ModalEffect> {
        let ModalState::Open {
            record_id,
            media_index: current,
        } = &self.state
        else {
            return Vec::new();
        };
        let Some(record) = records.iter().find(|r| &r.id == record_id) else {
            return Vec::new();
        };

        let next = clamp_index(media_index, record.media.len());
        if next == *current {
            return Vec::new();
        }

        let mut effects = Vec::new();
        if record.media.get(*current).is_some_and(MediaItem::is_video) {
            effects.push(ModalEffect::StopVideo);
        }
        if record.media.get(next).is_some_and(MediaItem::is_video) {
            effects.push(ModalEffect::PlayVideo);
        }
        self.state = ModalState::Open {
            record_id: record.id.clone(),
            media_index: next,
        };
        effects
    }

    /// Move by `delta` items within the open record, clamped at both ends.
    pub fn step(&mut self, records: &[Record], delta: isize) -> Vec<ModalEffect> {
        let ModalState::Open { media_index, .. } = self.state else {
            return Vec::new();
        };
        let target = media_index.saturating_add_signed(delta);
        self.select(records, target)
    }

    /// Close the lightbox. A no-op when already closed.
    pub fn dismiss(&mut self, records: &[Record], reason: DismissReason) -> Vec<ModalEffect> {
        if !self.is_open() {
            return Vec::new();
        }
        debug!("Dismissing lightbox: {reason:?}");

        let mut effects = Vec::new();
        if self.current_is_video(records) {
            effects.push(ModalEffect::StopVideo);
        }
        if self.checkpoint_pushed && reason != DismissReason::BackNavigation {
            effects.push(ModalEffect::ReleaseCheckpoint);
        }
        effects.push(ModalEffect::UnlockScroll);

        self.checkpoint_pushed = false;
        self.state = ModalState::Closed;
        effects
    }

    /// Clicks inside the content bubble up to the backdrop; only a click whose
    /// target is the backdrop itself dismisses.
    pub fn backdrop_click(&mut self, records: &[Record], target_is_backdrop: bool) -> Vec<ModalEffect> {
        if !target_is_backdrop {
            return Vec::new();
        }
        self.dismiss(records, DismissReason::Backdrop)
    }

    /// Projection of the open record for the lightbox view.
    pub fn view(&self, records: &[Record]) -> Option<LightboxView> {
        let ModalState::Open {
            record_id,
            media_index,
        } = &self.state
        else {
            return None;
        };
        let record = records.iter().find(|r| &r.id == record_id)?;
        let item = record.media.get(*media_index);

        Some(LightboxView {
            record_id: record.id.clone(),
            media_index: *media_index,
            media: record.media.clone(),
            title: item
                .and_then(|i| item_override(&i.title, &record.title))
                .or(record.title.as_deref())
                .unwrap_or_default()
                .to_string(),
            description: item
                .and_then(|i| item_override(&i.description, &record.description))
                .or(record.description.as_deref())
                .unwrap_or_default()
                .to_string(),
        })
    }

    fn current_is_video(&self, records: &[Record]) -> bool {
        self.view(records)
            .and_then(|view| view.current().cloned())
            .is_some_and(|item| item.is_video())
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

/// What the lightbox renders for the open record.
#[derive(Clone, Debug, PartialEq)]
pub struct LightboxView {
    pub record_id: String,
    pub media_index: usize,
    pub media: Vec<MediaItem>,
    pub title: String,
    pub description: String,
}

impl LightboxView {
    pub fn current(&self) -> Option<&MediaItem> {
        self.media.get(self.media_index)
    }

    pub fn show_thumbnails(&self) -> bool {
        self.media.len() > 1
    }

    pub fn can_prev(&self) -> bool {
        self.media_index > 0
    }

    pub fn can_next(&self) -> bool {
        self.media_index + 1 < self.media.len()
    }

    /// "2 / 5"
    pub fn counter(&self) -> String {
        format!("{} / {}", self.media_index + 1, self.media.len())
    }
}

/// Whether a gesture displacement dismisses the lightbox: the horizontal
/// distance must exceed the configured fraction of the viewport width and
/// dominate the vertical distance.
pub fn is_dismiss_swipe(dx: f64, dy: f64, viewport_width: f64, config: &GalleryConfig) -> bool {
    let threshold = viewport_width * config.swipe_distance_ratio;
    dx.abs() > threshold && dx.abs() >= dy.abs() * config.swipe_dominance
}

/// Remembers where a touch started.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SwipeTracker {
    start: Option<(f64, f64)>,
}

impl SwipeTracker {
    pub fn start(&mut self, x: f64, y: f64) {
        self.start = Some((x, y));
    }

    /// Finish the gesture. Returns true when it should dismiss.
    pub fn end(&mut self, x: f64, y: f64, viewport_width: f64, config: &GalleryConfig) -> bool {
        match self.start.take() {
            Some((start_x, start_y)) => {
                is_dismiss_swipe(x - start_x, y - start_y, viewport_width, config)
            }
            None => false,
        }
    }
}
