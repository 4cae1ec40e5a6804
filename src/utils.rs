use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Storage, Window};

/// 获取全局 window，页面环境下总是存在
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// 获取 document
pub fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

/// Run a selector against the document and collect element matches.
pub fn query_all(selector: &str) -> Vec<Element> {
    let Some(doc) = document() else {
        return Vec::new();
    };
    query_all_in(doc.as_ref(), selector)
}

/// Run a selector against an arbitrary root and collect element matches.
pub fn query_all_in(root: &web_sys::Node, selector: &str) -> Vec<Element> {
    let list = match root.dyn_ref::<Element>() {
        Some(el) => el.query_selector_all(selector),
        None => match root.dyn_ref::<Document>() {
            Some(doc) => doc.query_selector_all(selector),
            None => return Vec::new(),
        },
    };
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|idx| list.item(idx))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// localStorage，隐私模式下可能不可用
pub fn local_storage() -> Option<Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Read a stored preference; absence and storage errors both yield `None`.
pub fn storage_get(key: &str) -> Option<String> {
    local_storage().and_then(|s| s.get_item(key).ok().flatten())
}

/// Persist a preference; failures (quota, privacy mode) are ignored.
pub fn storage_set(key: &str, value: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(key, value);
    }
}

/// Show or hide an element through its inline `display` property. Passing
/// `true` removes the override so the stylesheet value applies again.
pub fn set_displayed(el: &Element, displayed: bool) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let style = html.style();
        if displayed {
            let _ = style.remove_property("display");
        } else {
            let _ = style.set_property("display", "none");
        }
    }
}

/// Wall-clock milliseconds, used for throttling.
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Viewport size as (width, height); zero when unavailable.
pub fn viewport_size() -> (f64, f64) {
    let Some(win) = web_sys::window() else {
        return (0.0, 0.0);
    };
    let width = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = win
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (width, height)
}

/// Vertical scroll offset of the window.
pub fn scroll_top() -> f64 {
    web_sys::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

/// Heading tag name (`H1`..`H6`) to its level, if the element is a heading.
pub fn heading_level(el: &Element) -> Option<u8> {
    let tag = el.tag_name();
    let mut chars = tag.chars();
    if chars.next()? != 'H' {
        return None;
    }
    let digit = chars.next()?.to_digit(10)?;
    if chars.next().is_some() || !(1..=6).contains(&digit) {
        return None;
    }
    Some(digit as u8)
}
