//! Auto-hiding top navigation.
//!
//! On desktop the header shows when the pointer nears the left edge and
//! hides shortly after it leaves, unless the pointer is resting on the
//! header itself. On mobile the same header is driven by the hamburger icon
//! instead. Which behavior applies is decided per event through a media
//! query, so a window resize switches modes without rebinding.

use std::{cell::Cell, rc::Rc};

use gloo_timers::callback::Timeout;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Element, HtmlElement, MouseEvent};
use yew::prelude::*;

use crate::{config, utils};

const SHOW_MENU_CLASS: &str = "show_menu";
const CLOSE_MENU_CLASS: &str = "close_menu";

fn is_desktop() -> bool {
    utils::window()
        .and_then(|w| w.match_media(config::DESKTOP_MEDIA_QUERY).ok().flatten())
        .map(|mql| mql.matches())
        .unwrap_or(true)
}

fn header() -> Option<HtmlElement> {
    utils::document()?
        .query_selector("header")
        .ok()??
        .dyn_into::<HtmlElement>()
        .ok()
}

/// Renders nothing; owns the listeners that drive the header's visibility.
#[function_component(NavAutoHide)]
pub fn nav_auto_hide() -> Html {
    use_effect_with((), |_| {
        let hovered = Rc::new(Cell::new(false));
        let pending_hide: Rc<Cell<Option<Timeout>>> = Rc::new(Cell::new(None));
        let mut cleanups: Vec<Box<dyn FnOnce()>> = Vec::new();

        // 桌面端：鼠标靠左缘出现，离开后延迟隐藏
        if let Some(doc) = utils::document() {
            let mousemove = {
                let hovered = hovered.clone();
                let pending_hide = pending_hide.clone();
                Closure::wrap(Box::new(move |event: MouseEvent| {
                    if !is_desktop() {
                        return;
                    }
                    let Some(head) = header() else {
                        return;
                    };
                    if f64::from(event.client_x()) <= config::NAV_TRIGGER_ZONE_PX {
                        pending_hide.set(None);
                        let _ = head.class_list().add_1(SHOW_MENU_CLASS);
                    } else if head.class_list().contains(SHOW_MENU_CLASS) {
                        let hovered = hovered.clone();
                        pending_hide.set(Some(Timeout::new(
                            config::NAV_HIDE_DELAY_MS,
                            move || {
                                if hovered.get() {
                                    return;
                                }
                                if let Some(head) = header() {
                                    let _ = head.class_list().remove_1(SHOW_MENU_CLASS);
                                }
                            },
                        )));
                    }
                }) as Box<dyn FnMut(MouseEvent)>)
            };
            let _ = doc
                .add_event_listener_with_callback("mousemove", mousemove.as_ref().unchecked_ref());
            let doc_for_cleanup = doc.clone();
            cleanups.push(Box::new(move || {
                let _ = doc_for_cleanup.remove_event_listener_with_callback(
                    "mousemove",
                    mousemove.as_ref().unchecked_ref(),
                );
                drop(mousemove);
            }));
        }

        // 指针停在 header 上时不收起
        if let Some(head) = header() {
            let enter = {
                let hovered = hovered.clone();
                Closure::wrap(Box::new(move |_: MouseEvent| {
                    hovered.set(true);
                }) as Box<dyn FnMut(MouseEvent)>)
            };
            let leave = {
                let hovered = hovered.clone();
                let pending_hide = pending_hide.clone();
                Closure::wrap(Box::new(move |_: MouseEvent| {
                    hovered.set(false);
                    if !is_desktop() {
                        return;
                    }
                    // 离开后同样延迟收起，期间回到 header 上则保留
                    let hovered = hovered.clone();
                    pending_hide.set(Some(Timeout::new(
                        config::NAV_HIDE_DELAY_MS,
                        move || {
                            if hovered.get() {
                                return;
                            }
                            if let Some(head) = header() {
                                let _ = head.class_list().remove_1(SHOW_MENU_CLASS);
                            }
                        },
                    )));
                }) as Box<dyn FnMut(MouseEvent)>)
            };
            let _ = head
                .add_event_listener_with_callback("mouseenter", enter.as_ref().unchecked_ref());
            let _ = head
                .add_event_listener_with_callback("mouseleave", leave.as_ref().unchecked_ref());
            let head_for_cleanup = head.clone();
            cleanups.push(Box::new(move || {
                let _ = head_for_cleanup.remove_event_listener_with_callback(
                    "mouseenter",
                    enter.as_ref().unchecked_ref(),
                );
                let _ = head_for_cleanup.remove_event_listener_with_callback(
                    "mouseleave",
                    leave.as_ref().unchecked_ref(),
                );
                drop(enter);
                drop(leave);
            }));
        }

        // 移动端汉堡按钮
        if let Some(icon) = utils::document()
            .and_then(|doc| doc.query_selector("#menu_icon").ok())
            .flatten()
        {
            let click = {
                let icon = icon.clone();
                Closure::wrap(Box::new(move |event: MouseEvent| {
                    if is_desktop() {
                        return;
                    }
                    event.stop_propagation();
                    let _ = toggle_class(&icon, CLOSE_MENU_CLASS);
                    if let Some(menu) = utils::document()
                        .and_then(|doc| doc.query_selector("nav ul").ok())
                        .flatten()
                    {
                        let _ = toggle_class(&menu, SHOW_MENU_CLASS);
                    }
                }) as Box<dyn FnMut(MouseEvent)>)
            };
            let _ =
                icon.add_event_listener_with_callback("click", click.as_ref().unchecked_ref());
            let icon_for_cleanup = icon.clone();
            cleanups.push(Box::new(move || {
                let _ = icon_for_cleanup.remove_event_listener_with_callback(
                    "click",
                    click.as_ref().unchecked_ref(),
                );
                drop(click);
            }));
        }

        move || {
            pending_hide.set(None);
            for cleanup in cleanups {
                cleanup();
            }
        }
    });

    html! {}
}

fn toggle_class(element: &Element, class: &str) -> bool {
    element.class_list().toggle(class).unwrap_or(false)
}
