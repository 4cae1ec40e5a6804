use wasm_bindgen::{closure::Closure, JsCast};
use yew::prelude::*;

use crate::config;

/// Attach a listener to a `window`-level event for the lifetime of the
/// component. The listener is removed when the component unmounts, so
/// overlays and panels never leak `scroll`/`resize`/`keydown` handlers.
///
/// # Example
/// ```rust
/// use yew::prelude::*;
/// use crate::hooks::use_window_event;
///
/// #[function_component(ScrollSpy)]
/// fn scroll_spy() -> Html {
///     use_window_event("scroll", Callback::from(|_event| {
///         // re-run classification
///     }));
///     html! {}
/// }
/// ```
#[hook]
pub fn use_window_event(event: &'static str, handler: Callback<web_sys::Event>) {
    use_effect_with((event, handler), move |(event, handler)| {
        let event = *event;
        let window = web_sys::window();
        let closure = {
            let handler = handler.clone();
            Closure::wrap(Box::new(move |e: web_sys::Event| {
                handler.emit(e);
            }) as Box<dyn FnMut(web_sys::Event)>)
        };
        if let Some(win) = window.as_ref() {
            let _ = win.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        }
        move || {
            if let Some(win) = window {
                let _ =
                    win.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            }
            drop(closure);
        }
    });
}

/// Run a binder once on mount and again every time the mutation observer
/// reports injected content. Binders are expected to be idempotent: they
/// must skip elements already marked processed, so repeated notifications
/// never attach duplicate listeners.
#[hook]
pub fn use_content_changed(on_change: Callback<()>) {
    use_effect_with(on_change, move |on_change| {
        // 首次挂载先跑一遍
        on_change.emit(());

        let document = web_sys::window().and_then(|w| w.document());
        let closure = {
            let on_change = on_change.clone();
            Closure::wrap(Box::new(move |_: web_sys::Event| {
                on_change.emit(());
            }) as Box<dyn FnMut(web_sys::Event)>)
        };
        if let Some(doc) = document.as_ref() {
            let _ = doc.add_event_listener_with_callback(
                config::CONTENT_CHANGED_EVENT,
                closure.as_ref().unchecked_ref(),
            );
        }
        move || {
            if let Some(doc) = document {
                let _ = doc.remove_event_listener_with_callback(
                    config::CONTENT_CHANGED_EVENT,
                    closure.as_ref().unchecked_ref(),
                );
            }
            drop(closure);
        }
    });
}
