//! Language switching.
//!
//! The chosen UI language survives page loads through a single localStorage
//! scalar. Switching first looks for an alternate-language version of the
//! current page (a derived URL probed with a HEAD request) and navigates to
//! it; when none exists, the interface strings are swapped in place and a
//! toast reports the change.

use gloo_net::http::{Method, RequestBuilder};
use wasm_bindgen::JsValue;
use web_sys::Element;

use crate::{
    config,
    i18n::{self, Lang},
    utils,
};

/// The language the interface should use: stored preference first, browser
/// language otherwise.
pub fn preferred_language() -> Lang {
    if let Some(stored) = utils::storage_get(config::LANG_STORAGE_KEY) {
        if let Some(lang) = Lang::from_code(&stored) {
            return lang;
        }
    }
    let tag = web_sys::window()
        .map(|w| w.navigator())
        .and_then(|n| n.language())
        .unwrap_or_default();
    Lang::from_browser_tag(&tag)
}

/// The language of the current page, derived from the URL's `.zh-CN` infix
/// or the `article:lang` meta tag. Defaults to English.
pub fn page_language() -> Lang {
    if let Some(path) = current_path() {
        if let Some(lang) = page_language_from_path(&path) {
            return lang;
        }
    }
    utils::document()
        .and_then(|doc| doc.query_selector("meta[name=\"article:lang\"]").ok())
        .flatten()
        .and_then(|meta| meta.get_attribute("content"))
        .and_then(|code| Lang::from_code(&code))
        .unwrap_or(Lang::En)
}

/// Page language encoded in the path, if any.
pub fn page_language_from_path(path: &str) -> Option<Lang> {
    path.contains(".zh-CN").then_some(Lang::ZhCn)
}

/// Derives the URL of the alternate-language version of a page.
///
/// English pages gain a `.zh-CN` infix (`/about/` becomes
/// `/about/index.zh-CN.html`); Chinese pages lose it. Returns `None` when no
/// derivation applies (already in the target language, unrecognized shape).
pub fn alternate_url(path: &str, page_lang: Lang, target: Lang) -> Option<String> {
    match (page_lang, target) {
        (Lang::En, Lang::ZhCn) => {
            if path.ends_with('/') {
                Some(format!("{path}index.zh-CN.html"))
            } else if let Some(stem) = path.strip_suffix(".html") {
                Some(format!("{stem}.zh-CN.html"))
            } else {
                Some(format!("{path}/index.zh-CN.html"))
            }
        },
        (Lang::ZhCn, Lang::En) => {
            if path.contains("/index.zh-CN.html") {
                Some(path.replace("/index.zh-CN.html", "/"))
            } else if path.contains(".zh-CN.html") {
                Some(path.replace(".zh-CN.html", ".html"))
            } else if path.contains(".zh-CN") {
                Some(path.replace(".zh-CN", ""))
            } else {
                None
            }
        },
        _ => None,
    }
}

/// HEAD-probes a derived URL; network failures mean "does not exist".
pub async fn alternate_exists(url: &str) -> bool {
    RequestBuilder::new(url)
        .method(Method::HEAD)
        .send()
        .await
        .map(|resp| resp.ok())
        .unwrap_or(false)
}

/// Applies a language to every translatable element in place and persists
/// the preference. Missing lookups leave elements untranslated.
pub fn apply_language(lang: Lang) {
    let Some(doc) = utils::document() else {
        return;
    };
    if let Some(root) = doc.document_element() {
        let _ = root.set_attribute("lang", lang.as_str());
    }

    // 导航菜单项
    for link in utils::query_all("nav ul li a") {
        if let Some(key) = link.get_attribute("data-i18n-key") {
            if let Some(text) = i18n::lookup(lang, &key) {
                link.set_text_content(Some(text));
            }
        }
    }

    for element in utils::query_all("[data-i18n]") {
        translate_element(&element, lang);
    }

    // Tooltip keys: the original key is pinned on first contact so repeated
    // switches keep resolving.
    for element in utils::query_all("[data-title]") {
        let key = match element.get_attribute("data-title-key") {
            Some(key) => key,
            None => {
                let Some(current) = element.get_attribute("data-title") else {
                    continue;
                };
                let _ = element.set_attribute("data-title-key", &current);
                current
            },
        };
        if let Some(text) = i18n::lookup(lang, &key) {
            let _ = element.set_attribute("data-title", text);
        }
    }

    // Pagination links
    if let Ok(Some(older)) = doc.query_selector(".pagination .extend.prev") {
        if let Some(text) = i18n::lookup(lang, "Older Posts") {
            older.set_text_content(Some(text));
        }
    }
    if let Ok(Some(newer)) = doc.query_selector(".pagination .extend.next") {
        if let Some(text) = i18n::lookup(lang, "Newer Posts") {
            newer.set_text_content(Some(text));
        }
    }

    utils::storage_set(config::LANG_STORAGE_KEY, lang.as_str());
}

fn translate_element(element: &Element, lang: Lang) {
    let Some(key) = element.get_attribute("data-i18n") else {
        return;
    };
    let fallback = element
        .get_attribute("data-i18n-default")
        .or_else(|| element.text_content());
    let value = i18n::lookup(lang, &key)
        .map(str::to_string)
        .or(fallback)
        .unwrap_or_default();
    let value = match parse_vars(element) {
        Some(vars) => i18n::fill_placeholders(&value, &vars),
        None => value,
    };
    element.set_text_content(Some(&value));
}

/// Parses the `data-i18n-vars` JSON attribute. Malformed JSON logs a warning
/// and falls back to no substitution.
fn parse_vars(element: &Element) -> Option<serde_json::Value> {
    let raw = element.get_attribute("data-i18n-vars")?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            web_sys::console::warn_2(
                &JsValue::from_str(&format!("invalid data-i18n-vars: {err}")),
                &JsValue::from_str(&raw),
            );
            None
        },
    }
}

/// Current location pathname.
pub fn current_path() -> Option<String> {
    web_sys::window().and_then(|w| w.location().pathname().ok())
}

/// Applies the preferred language on load and, when the page exists in that
/// language under a derived URL, silently redirects to it.
pub fn init_language() {
    let preferred = preferred_language();
    let page = page_language();
    apply_language(preferred);

    if preferred == page {
        return;
    }
    let Some(path) = current_path() else {
        return;
    };
    let Some(alternate) = alternate_url(&path, page, preferred) else {
        return;
    };
    wasm_bindgen_futures::spawn_local(async move {
        if alternate_exists(&alternate).await {
            if let Some(win) = web_sys::window() {
                let _ = win.location().replace(&alternate);
            }
        }
    });
}

/// Switches to the other language. Navigates to the alternate page version
/// when it exists; otherwise swaps interface strings in place and returns
/// the toast message to show.
pub async fn switch_language() -> Option<String> {
    let target = preferred_language().other();
    let page = page_language();

    if let Some(path) = current_path() {
        if let Some(alternate) = alternate_url(&path, page, target) {
            if alternate_exists(&alternate).await {
                utils::storage_set(config::LANG_STORAGE_KEY, target.as_str());
                if let Some(win) = web_sys::window() {
                    let _ = win.location().set_href(&alternate);
                }
                return None;
            }
        }
    }

    apply_language(target);
    Some(
        i18n::lookup(target, "languageSwitched")
            .unwrap_or("Language switched")
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_directory_pages_gain_the_zh_index() {
        assert_eq!(
            alternate_url("/about/", Lang::En, Lang::ZhCn).as_deref(),
            Some("/about/index.zh-CN.html")
        );
        assert_eq!(
            alternate_url("/2025/01/01/my-post/", Lang::En, Lang::ZhCn).as_deref(),
            Some("/2025/01/01/my-post/index.zh-CN.html")
        );
    }

    #[test]
    fn english_html_pages_gain_the_zh_infix() {
        assert_eq!(
            alternate_url("/about/page.html", Lang::En, Lang::ZhCn).as_deref(),
            Some("/about/page.zh-CN.html")
        );
        assert_eq!(
            alternate_url("/bare", Lang::En, Lang::ZhCn).as_deref(),
            Some("/bare/index.zh-CN.html")
        );
    }

    #[test]
    fn chinese_pages_lose_the_zh_infix() {
        assert_eq!(
            alternate_url("/about/index.zh-CN.html", Lang::ZhCn, Lang::En).as_deref(),
            Some("/about/")
        );
        assert_eq!(
            alternate_url("/about/page.zh-CN.html", Lang::ZhCn, Lang::En).as_deref(),
            Some("/about/page.html")
        );
        assert_eq!(
            alternate_url("/about/page.zh-CN", Lang::ZhCn, Lang::En).as_deref(),
            Some("/about/page")
        );
    }

    #[test]
    fn same_language_or_unrecognized_shapes_derive_nothing() {
        assert_eq!(alternate_url("/about/", Lang::En, Lang::En), None);
        assert_eq!(alternate_url("/about/", Lang::ZhCn, Lang::En), None);
    }

    #[test]
    fn page_language_is_read_from_the_path_infix() {
        assert_eq!(
            page_language_from_path("/p/index.zh-CN.html"),
            Some(Lang::ZhCn)
        );
        assert_eq!(page_language_from_path("/p/index.html"), None);
    }
}
