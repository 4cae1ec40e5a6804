//! Code block decoration: copy buttons on every block, expand-to-fullscreen
//! for blocks taller than the stylesheet's cut-off.

use std::{cell::RefCell, rc::Rc};

use wasm_bindgen::{closure::Closure, JsCast};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, HtmlDocument, HtmlElement, HtmlTextAreaElement, KeyboardEvent};

use crate::{config, i18n, lang, utils};

fn label(key: &str) -> String {
    let current = lang::preferred_language();
    i18n::lookup(current, key).unwrap_or(key).to_string()
}

/// Decorates every `figure.highlight` not yet wrapped in a container.
/// Idempotent: wrapped blocks are skipped, so repeated content-changed
/// notifications never stack buttons.
pub fn bind_all() {
    for code_block in utils::query_all("figure.highlight") {
        if matches!(code_block.closest(".code-block-container"), Ok(Some(_))) {
            continue;
        }
        decorate(&code_block);
    }
}

fn decorate(code_block: &Element) {
    let Some(doc) = utils::document() else {
        return;
    };

    // Hexo 产出的行号表格压平成单个 pre，复制和全屏都更好处理
    if let Ok(Some(table)) = code_block.query_selector("table") {
        if let Ok(Some(code_cell)) = table.query_selector("td.code") {
            if let Ok(pre) = doc.create_element("pre") {
                pre.set_class_name("code");
                pre.set_inner_html(&code_cell.inner_html());
                code_block.set_inner_html("");
                let _ = code_block.append_child(&pre);
            }
        }
    }

    let Ok(Some(code_content)) = code_block.query_selector("pre.code") else {
        return;
    };

    let Ok(container) = doc.create_element("div") else {
        return;
    };
    container.set_class_name("code-block-container");
    if let Some(parent) = code_block.parent_node() {
        let _ = parent.insert_before(&container, Some(code_block.unchecked_ref()));
    }
    let _ = container.append_child(code_block);

    let Ok(buttons) = doc.create_element("div") else {
        return;
    };
    buttons.set_class_name("code-buttons");

    if let Ok(copy_button) = doc.create_element("button") {
        copy_button.set_class_name("copy-code-button");
        let _ = copy_button.set_attribute("data-i18n", "Copy Code");
        copy_button.set_text_content(Some(&label("Copy Code")));
        let listener = {
            let code_content = code_content.clone();
            let copy_button = copy_button.clone();
            Closure::wrap(Box::new(move |event: web_sys::Event| {
                event.prevent_default();
                event.stop_propagation();
                copy_to_clipboard(&code_content, &copy_button);
            }) as Box<dyn FnMut(web_sys::Event)>)
        };
        let _ = copy_button
            .add_event_listener_with_callback("click", listener.as_ref().unchecked_ref());
        listener.forget();
        let _ = buttons.append_child(&copy_button);
    }

    let needs_expansion = code_content.scroll_height() > config::CODE_MAX_HEIGHT_PX;
    if needs_expansion {
        let _ = container.class_list().add_1("collapsed");
        if let Ok(expand_button) = doc.create_element("button") {
            expand_button.set_class_name("expand-button");
            let _ = expand_button.set_attribute("data-i18n", "Expand Code");
            expand_button.set_text_content(Some(&label("Expand Code")));
            let listener = {
                let container = container.clone();
                let code_block = code_block.clone();
                Closure::wrap(Box::new(move |_: web_sys::Event| {
                    if container.class_list().contains("collapsed") {
                        show_fullscreen(&code_block);
                    }
                }) as Box<dyn FnMut(web_sys::Event)>)
            };
            let _ = expand_button
                .add_event_listener_with_callback("click", listener.as_ref().unchecked_ref());
            listener.forget();
            let _ = buttons.append_child(&expand_button);
        }
    }

    let _ = container.append_child(&buttons);
}

/// Copies through the async Clipboard API in secure contexts, falling back
/// to the legacy textarea mechanism, then giving up silently.
fn copy_to_clipboard(code: &Element, button: &Element) {
    let text = code.text_content().unwrap_or_default();
    let Some(win) = web_sys::window() else {
        return;
    };
    if win.is_secure_context() {
        let clipboard = win.navigator().clipboard();
        let button = button.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match JsFuture::from(clipboard.write_text(&text)).await {
                Ok(_) => show_copy_success(&button),
                Err(_) => fallback_copy(&text, &button),
            }
        });
    } else {
        fallback_copy(&text, button);
    }
}

fn fallback_copy(text: &str, button: &Element) {
    let Some(doc) = utils::document() else {
        return;
    };
    let Some(body) = doc.body() else {
        return;
    };
    let Ok(textarea) = doc
        .create_element("textarea")
        .and_then(|el| el.dyn_into::<HtmlTextAreaElement>().map_err(Into::into))
    else {
        return;
    };
    textarea.set_value(text);
    let style = textarea.style();
    let _ = style.set_property("position", "fixed");
    let _ = style.set_property("top", "0");
    let _ = style.set_property("left", "0");
    let _ = style.set_property("width", "2em");
    let _ = style.set_property("height", "2em");
    let _ = style.set_property("opacity", "0");

    let _ = body.append_child(&textarea);
    let _ = textarea.focus();
    textarea.select();
    let copied = doc
        .dyn_ref::<HtmlDocument>()
        .and_then(|html_doc| html_doc.exec_command("copy").ok())
        .unwrap_or(false);
    if copied {
        show_copy_success(button);
    }
    textarea.remove();
}

fn show_copy_success(button: &Element) {
    let _ = button.class_list().add_1("copied");
    button.set_text_content(Some(&label("Copied")));
    let button = button.clone();
    gloo_timers::callback::Timeout::new(config::COPY_RESET_MS, move || {
        let _ = button.class_list().remove_1("copied");
        button.set_text_content(Some(&label("Copy Code")));
    })
    .forget();
}

/// Opens the fullscreen modal for a code block: cloned content with controls
/// stripped, body scroll locked, closed by button, backdrop or Escape. All
/// document-level listeners are removed when the modal closes.
fn show_fullscreen(code_block: &Element) {
    let Some(doc) = utils::document() else {
        return;
    };
    let Some(body) = doc.body() else {
        return;
    };
    let Ok(modal) = doc.create_element("div") else {
        return;
    };
    modal.set_class_name("code-fullscreen-modal active");
    let Ok(content) = doc.create_element("div") else {
        return;
    };
    content.set_class_name("code-fullscreen-content");

    let source = code_block
        .closest(".code-block-container")
        .ok()
        .flatten()
        .unwrap_or_else(|| code_block.clone());
    let Ok(cloned) = source.clone_node_with_deep(true) else {
        return;
    };
    let Ok(cloned) = cloned.dyn_into::<Element>() else {
        return;
    };

    // 模态框里不需要按钮
    for control in utils::query_all_in(
        cloned.as_ref(),
        ".code-buttons, .copy-code-button, .expand-button",
    ) {
        control.remove();
    }
    let wrapper = if cloned.class_list().contains("code-block-container") {
        Some(cloned.clone())
    } else {
        cloned.query_selector(".code-block-container").ok().flatten()
    };
    if let Some(wrapper) = wrapper {
        let _ = wrapper.class_list().remove_1("collapsed");
        if let Some(html) = wrapper.dyn_ref::<HtmlElement>() {
            let _ = html.style().set_property("margin", "0");
        }
    }
    let _ = content.append_child(&cloned);

    let Ok(close_button) = doc.create_element("button") else {
        return;
    };
    close_button.set_class_name("close-fullscreen");
    let _ = close_button.set_attribute("data-i18n", "Close");
    close_button.set_text_content(Some(&label("Close")));
    let _ = content.append_child(&close_button);
    let _ = modal.append_child(&content);
    let _ = body.append_child(&modal);
    let _ = body.style().set_property("overflow", "hidden");

    let keydown_slot: Rc<RefCell<Option<Closure<dyn FnMut(KeyboardEvent)>>>> =
        Rc::new(RefCell::new(None));
    let close: Rc<dyn Fn()> = {
        let modal = modal.clone();
        let body = body.clone();
        let doc = doc.clone();
        let keydown_slot = keydown_slot.clone();
        Rc::new(move || {
            modal.remove();
            let _ = body.style().remove_property("overflow");
            if let Some(listener) = keydown_slot.borrow_mut().take() {
                let _ = doc.remove_event_listener_with_callback(
                    "keydown",
                    listener.as_ref().unchecked_ref(),
                );
            }
        })
    };

    let close_click = {
        let close = close.clone();
        Closure::wrap(Box::new(move |_: web_sys::Event| close()) as Box<dyn FnMut(web_sys::Event)>)
    };
    let _ = close_button
        .add_event_listener_with_callback("click", close_click.as_ref().unchecked_ref());
    close_click.forget();

    let backdrop_click = {
        let close = close.clone();
        let modal = modal.clone();
        Closure::wrap(Box::new(move |event: web_sys::Event| {
            if event
                .target()
                .as_ref()
                .and_then(|t| t.dyn_ref::<Element>())
                .is_some_and(|el| el == &modal)
            {
                close();
            }
        }) as Box<dyn FnMut(web_sys::Event)>)
    };
    let _ = modal
        .add_event_listener_with_callback("click", backdrop_click.as_ref().unchecked_ref());
    backdrop_click.forget();

    let keydown = {
        let close = close.clone();
        Closure::wrap(Box::new(move |event: KeyboardEvent| {
            if event.key() == "Escape" {
                close();
            }
        }) as Box<dyn FnMut(KeyboardEvent)>)
    };
    let _ = doc.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref());
    *keydown_slot.borrow_mut() = Some(keydown);
}
