//! Marks article images as zoomable and wires their click-to-open listeners.

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Element, HtmlElement, HtmlImageElement};
use yew::Callback;

use crate::utils;

const ZOOMABLE_CLASS: &str = "image-zoomable";
const IMAGE_SELECTOR: &str = "article img, .markdown-body img, .post img, \
                              .entry-content img, .content img, .main-content img, .page img";

pub type ImageListener = (Element, Closure<dyn FnMut(web_sys::Event)>);

/// Binds every not-yet-marked content image: adds the zoomable class and a
/// click listener that emits the full-resolution source (the `data-origin`
/// attribute when present, the `src` otherwise). Returns the new listeners
/// so the overlay component can detach them on unmount. Already-marked
/// images are skipped, so repeated passes bind nothing twice.
pub fn bind_zoomable(on_open: &Callback<String>) -> Vec<ImageListener> {
    let mut bound = Vec::new();
    for element in utils::query_all(IMAGE_SELECTOR) {
        if element.class_list().contains(ZOOMABLE_CLASS) {
            continue;
        }
        let Ok(image) = element.dyn_into::<HtmlImageElement>() else {
            continue;
        };
        let _ = image.class_list().add_1(ZOOMABLE_CLASS);
        if let Some(html) = image.dyn_ref::<HtmlElement>() {
            let _ = html.style().set_property("cursor", "zoom-in");
        }

        let listener = {
            let on_open = on_open.clone();
            let image = image.clone();
            Closure::wrap(Box::new(move |event: web_sys::Event| {
                event.prevent_default();
                event.stop_propagation();
                let source = image
                    .get_attribute("data-origin")
                    .filter(|origin| !origin.is_empty())
                    .unwrap_or_else(|| image.src());
                on_open.emit(source);
            }) as Box<dyn FnMut(web_sys::Event)>)
        };
        let _ = image.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref());
        bound.push((image.into(), listener));
    }
    bound
}
