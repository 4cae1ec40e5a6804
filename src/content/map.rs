//! Sizing for the optional `#map` element on travel pages.

use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::{config, utils};

/// Sizes `#map` to the viewport: full window height, and on wide screens an
/// offset that clears the fixed header. No-op on pages without a map.
pub fn resize_map() {
    let Some(doc) = utils::document() else {
        return;
    };
    let Ok(Some(map)) = doc.query_selector("#map") else {
        return;
    };
    let Some(map) = map.dyn_ref::<HtmlElement>().cloned() else {
        return;
    };
    let (width, height) = utils::viewport_size();

    let style = map.style();
    let _ = style.set_property("height", &format!("{height}px"));
    let _ = style.set_property("max-width", "100%");

    let header_width = doc
        .query_selector("header")
        .ok()
        .flatten()
        .and_then(|h| h.dyn_into::<HtmlElement>().ok())
        .map(|h| h.offset_width())
        .unwrap_or(0);
    let margin = if width > config::MAP_WIDE_MIN_WIDTH {
        header_width + 50
    } else {
        0
    };
    let _ = style.set_property("margin-left", &format!("{margin}px"));
}
