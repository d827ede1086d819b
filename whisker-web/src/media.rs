//! Video playback in the browser: the lightbox's main video and the
//! visibility-driven previews in the grid
//!
//! Playback is best effort. `play()` rejects when the platform blocks
//! autoplay; those rejections are logged at debug level and dropped.

use wasm_bindgen_futures_x::JsFuture;
use wasm_bindgen_x::prelude::*;
use wasm_bindgen_x::JsCast;
use web_sys_x::{HtmlMediaElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use whisker_common::Region;

/// Grid previews handed to the observer
pub const AUTOPLAY_SELECTOR: &str = "video[data-autoplay]";

/// Fraction of a preview that must be on screen before it plays
const VISIBLE_THRESHOLD: f64 = 0.25;

fn document() -> Option<web_sys_x::Document> {
    web_sys_x::window()?.document()
}

fn lightbox_video() -> Option<HtmlMediaElement> {
    let selector = format!("#{} video", Region::ModalMedia.id());
    document()?
        .query_selector(&selector)
        .ok()
        .flatten()?
        .dyn_into::<HtmlMediaElement>()
        .ok()
}

async fn try_play(video: &HtmlMediaElement) -> Result<(), JsValue> {
    JsFuture::from(video.play()?).await.map(|_| ())
}

/// Unmute and play the lightbox video. Falls back to muted playback when
/// the platform refuses audible autoplay.
pub async fn play_lightbox_video() {
    let Some(video) = lightbox_video() else {
        return;
    };
    video.set_muted(false);
    if let Err(e) = try_play(&video).await {
        tracing::debug!("Audible autoplay rejected: {e:?}");
        video.set_muted(true);
        if let Err(e) = try_play(&video).await {
            tracing::debug!("Muted autoplay rejected: {e:?}");
        }
    }
}

/// Mute and pause the lightbox video so nothing keeps playing once it is
/// replaced or closed.
pub fn stop_lightbox_video() {
    if let Some(video) = lightbox_video() {
        video.set_muted(true);
        let _ = video.pause();
    }
}

fn play_muted(video: HtmlMediaElement) {
    video.set_muted(true);
    wasm_bindgen_futures_x::spawn_local(async move {
        if let Err(e) = try_play(&video).await {
            tracing::debug!("Preview autoplay rejected: {e:?}");
        }
    });
}

type ObserverCallback = Closure<dyn FnMut(js_sys_x::Array, IntersectionObserver)>;

/// Plays grid previews while they are on screen and pauses them when they
/// scroll away. Disconnects when dropped.
pub struct VisibilityObserver {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl VisibilityObserver {
    /// Observe every element matching `selector`. `None` when the page has
    /// no such elements or the browser has no IntersectionObserver.
    pub fn observe(selector: &str) -> Option<Self> {
        let nodes = document()?.query_selector_all(selector).ok()?;
        if nodes.length() == 0 {
            return None;
        }

        let callback: ObserverCallback = Closure::wrap(Box::new(
            move |entries: js_sys_x::Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let Ok(video) = entry.target().dyn_into::<HtmlMediaElement>() else {
                        continue;
                    };
                    if entry.is_intersecting() {
                        play_muted(video);
                    } else {
                        let _ = video.pause();
                    }
                }
            },
        ));

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(VISIBLE_THRESHOLD));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init).ok()?;

        for i in 0..nodes.length() {
            if let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<web_sys_x::Element>().ok()) {
                observer.observe(&element);
            }
        }
        tracing::debug!("Observing {} video previews", nodes.length());

        Some(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for VisibilityObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
