use crate::api::RecordStoreClient;
use crate::config::gallery_config;
use crate::effects::EffectRuntime;
use crate::Route;
use dioxus::prelude::*;
use std::rc::Rc;
use whisker_common::GalleryAction;
use whisker_ui::stores::GalleryState;
use whisker_ui::GalleryView;

/// Owns the gallery for the whole visit. Both gallery routes render inside
/// it, so moving between them keeps the store and never fetches twice.
#[component]
pub fn GalleryShell() -> Element {
    let store = use_store(|| GalleryState::with_config(gallery_config()));
    let runtime = use_hook(|| EffectRuntime::new(store));
    use_context_provider(|| runtime);
    let _back_listener = use_hook(|| Rc::new(runtime.listen_back_navigation()));
    use_drop(move || runtime.teardown());

    // One collection fetch per page load
    use_future(move || async move {
        let result = match RecordStoreClient::from_env() {
            Ok(client) => client.fetch_all().await,
            Err(e) => Err(e),
        };
        match result {
            Ok(records) => runtime.dispatch(GalleryAction::RecordsLoaded(records)),
            Err(e) => runtime.dispatch(GalleryAction::LoadFailed(format!("Couldn't load cats: {e}"))),
        }
    });

    rsx! {
        GalleryView { state: store, on_action: move |action| runtime.dispatch(action) }
        Outlet::<Route> {}
    }
}

#[component]
pub fn Gallery() -> Element {
    rsx! {}
}

/// Opens the lightbox on `id`, again whenever the id changes. Before the
/// collection arrives the session holds the request; an unknown id just
/// shows the gallery.
#[component]
pub fn CatDetail(id: ReadSignal<String>) -> Element {
    let runtime = use_context::<EffectRuntime>();

    use_effect(move || {
        let record_id = id();
        runtime.dispatch(GalleryAction::ActivateRecord { record_id });
    });

    rsx! {}
}
