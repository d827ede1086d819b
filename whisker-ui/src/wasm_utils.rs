//! WASM utilities for browser interop
//!
//! # Event Listener Cleanup Pattern
//!
//! A JavaScript listener backed by a Rust `Closure` must not outlive the
//! closure. Rather than `closure.forget()`, which leaks the closure and
//! leaves the listener attached forever, [`EventListener`] keeps the closure
//! and removes the listener in `Drop`:
//!
//! ```ignore
//! let listener = EventListener::window("popstate", move |_| on_back());
//! // Listener is removed when `listener` is dropped
//! drop(listener);
//! ```
//!
//! Store the listener in a `Signal<Option<EventListener>>` and set it to
//! `None` to detach it.

use wasm_bindgen_x::prelude::*;

/// An event listener that removes itself when dropped.
pub struct EventListener {
    target: web_sys_x::EventTarget,
    event_name: &'static str,
    callback: Closure<dyn FnMut(wasm_bindgen_x::JsValue)>,
}

impl EventListener {
    /// Attaches `callback` to `target` for `event_name`.
    pub fn new(
        target: web_sys_x::EventTarget,
        event_name: &'static str,
        callback: impl FnMut(wasm_bindgen_x::JsValue) + 'static,
    ) -> Self {
        let callback: Closure<dyn FnMut(wasm_bindgen_x::JsValue)> =
            Closure::wrap(Box::new(callback));

        target
            .add_event_listener_with_callback(event_name, callback.as_ref().unchecked_ref())
            .ok();

        Self {
            target,
            event_name,
            callback,
        }
    }

    /// Attaches to the window, if there is one.
    pub fn window(
        event_name: &'static str,
        callback: impl FnMut(wasm_bindgen_x::JsValue) + 'static,
    ) -> Option<Self> {
        let window = web_sys_x::window()?;
        Some(Self::new(window.into(), event_name, callback))
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.event_name,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}

/// Inner width of the window in CSS pixels, or 0 when unavailable.
pub fn viewport_width() -> f64 {
    web_sys_x::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}
