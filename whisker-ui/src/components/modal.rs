//! Modal on the native HTML `<dialog>` element
//!
//! `showModal()` gives top-layer rendering, a focus trap and a `cancel`
//! event on Escape. The dialog manages its own display; layout lives on an
//! inner fixed container that doubles as the click backdrop.
//!
//! `cancel` only fires from user actions, never from a programmatic
//! `close()`. `showModal()` throws when the dialog is already open, so the
//! `open` attribute is checked first.

use dioxus::prelude::*;
use wasm_bindgen_x::JsCast;
use whisker_common::Region;

fn call_dialog_method(element: &web_sys_x::Element, method: &str) {
    if let Ok(func) = js_sys_x::Reflect::get(element, &method.into()) {
        if let Some(func) = func.dyn_ref::<js_sys_x::Function>() {
            let _ = func.call0(element);
        }
    }
}

#[component]
pub fn Modal(
    is_open: ReadSignal<bool>,
    /// Escape pressed
    on_cancel: EventHandler<()>,
    /// Click landed on the backdrop itself
    on_backdrop_click: EventHandler<()>,
    #[props(default)] on_keydown: Option<EventHandler<KeyboardEvent>>,
    children: Element,
    #[props(default)] class: Option<String>,
) -> Element {
    let dialog_id = Region::Modal.id();

    use_effect(move || {
        let is_open = is_open();

        let Some(element) = web_sys_x::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(dialog_id))
        else {
            return;
        };

        match (is_open, element.has_attribute("open")) {
            (true, false) => call_dialog_method(&element, "showModal"),
            (false, true) => call_dialog_method(&element, "close"),
            _ => {}
        }
    });

    let dialog_class = class.unwrap_or_default();

    // No display classes on the dialog itself: they would override the
    // native display:none while closed.
    rsx! {
        dialog {
            id: dialog_id,
            class: "p-0 bg-transparent backdrop:bg-black/90 {dialog_class}",
            aria_modal: "true",
            oncancel: move |evt| {
                evt.prevent_default();
                on_cancel.call(());
            },
            onkeydown: move |evt| {
                if let Some(handler) = &on_keydown {
                    handler.call(evt);
                }
            },
            if is_open() {
                div {
                    id: Region::ModalBackdrop.id(),
                    class: "fixed inset-0 flex items-center justify-center",
                    onclick: move |_| on_backdrop_click.call(()),
                    // Content clicks stop here so only backdrop clicks dismiss
                    div { onclick: move |evt| evt.stop_propagation(), {children} }
                }
            }
        }
    }
}
