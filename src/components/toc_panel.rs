//! Floating table-of-contents panel.
//!
//! Rows mirror the page outline one-to-one. Collapse toggles from the rows
//! and from the in-content buttons share one controller, label clicks scroll
//! to the heading, and scrolling back feeds row styling through the reading
//! classifier. The panel itself can be dragged by its body and resized from
//! an 8-px border band.

use std::{cell::RefCell, rc::Rc};

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Element, HtmlElement, MouseEvent};
use yew::prelude::*;

use crate::{
    config,
    content::collapse::CollapseController,
    hooks::{use_content_changed, use_window_event},
    outline::{
        panel::{self, GestureKind, Rect},
        reading::{self, Classification, ReadingState, Throttle},
    },
    utils,
};

struct Gesture {
    kind: GestureKind,
    origin: Rect,
    start_x: f64,
    start_y: f64,
}

struct GestureListeners {
    mousemove: Closure<dyn FnMut(MouseEvent)>,
    mouseup: Closure<dyn FnMut(MouseEvent)>,
}

fn detach_gesture_listeners(slot: &Rc<RefCell<Option<GestureListeners>>>) {
    let Some(listeners) = slot.borrow_mut().take() else {
        return;
    };
    if let Some(doc) = utils::document() {
        let _ = doc.remove_event_listener_with_callback(
            "mousemove",
            listeners.mousemove.as_ref().unchecked_ref(),
        );
        let _ = doc.remove_event_listener_with_callback(
            "mouseup",
            listeners.mouseup.as_ref().unchecked_ref(),
        );
    }
}

fn panel_rect(panel_ref: &NodeRef) -> Option<Rect> {
    let element = panel_ref.cast::<Element>()?;
    let rect = element.get_bounding_client_rect();
    Some(Rect {
        left: rect.left(),
        top: rect.top(),
        width: rect.width(),
        height: rect.height(),
    })
}

fn row_style(level: u8, state: Option<ReadingState>, active: bool, hidden: bool) -> String {
    // 层级越深底色越淡；已读的行压灰，当前行加重
    let alpha = match level {
        1 => 0.28,
        2 => 0.22,
        3 => 0.16,
        4 => 0.12,
        5 => 0.08,
        _ => 0.05,
    };
    let background = match state {
        Some(ReadingState::Passed) => "rgba(140, 140, 140, 0.12)".to_string(),
        Some(ReadingState::Reading) => format!("rgba(64, 158, 255, {alpha})"),
        Some(ReadingState::Coming) | None => "transparent".to_string(),
    };
    let mut style = format!(
        "padding-left: {}px; background: {background};",
        8 + u32::from(level.saturating_sub(1)) * 14
    );
    if active {
        style.push_str(" font-weight: bold; border-left: 3px solid rgba(64, 158, 255, 0.9);");
    }
    if hidden {
        style.push_str(" display: none;");
    }
    style
}

#[function_component(TocPanel)]
pub fn toc_panel() -> Html {
    let controller = use_mut_ref(CollapseController::new);
    let redraw = use_force_update();
    // use_state_eq: classify 在每个滚动 tick 都跑，结果没变就不重绘
    let classification = use_state_eq(|| Classification {
        states: Vec::new(),
        active: None,
    });
    let throttle = use_mut_ref(|| Throttle::new(config::CLASSIFY_THROTTLE_MS));
    let rect = use_state(|| Option::<Rect>::None);
    let gesture = use_mut_ref(|| Option::<Gesture>::None);
    let gesture_listeners: Rc<RefCell<Option<GestureListeners>>> =
        use_mut_ref(|| None);
    let panel_ref = use_node_ref();

    // use_callback 固定回调身份，避免每次重绘都重挂监听
    let classify_now = {
        let controller = controller.clone();
        let classification = classification.clone();
        use_callback((), move |_: (), _| {
            let extents = controller.borrow().extents();
            let (_, viewport_height) = utils::viewport_size();
            let top = utils::scroll_top();
            let bottom = top + viewport_height;
            let center = top + viewport_height / 2.0;
            let next = reading::classify(&extents, top, bottom, center);
            classification.set(next);
        })
    };

    let on_heading_toggle = {
        let controller = controller.clone();
        let redraw = redraw.clone();
        let classify_now = classify_now.clone();
        use_callback((), move |heading: Element, _| {
            let mut controller = controller.borrow_mut();
            if let Some(index) = controller.index_of(&heading) {
                if controller.toggle(index).is_some() {
                    redraw.force_update();
                }
            }
            drop(controller);
            // 折叠改变布局，标题位置要重算
            classify_now.emit(());
        })
    };

    {
        let controller = controller.clone();
        let redraw = redraw.clone();
        let classify_now = classify_now.clone();
        let on_heading_toggle = on_heading_toggle.clone();
        let on_change = use_callback((), move |_: (), _| {
            let changed = controller.borrow_mut().rescan(&on_heading_toggle);
            if changed {
                redraw.force_update();
            }
            classify_now.emit(());
        });
        use_content_changed(on_change);
    }

    {
        let classify_now = classify_now.clone();
        let throttle = throttle.clone();
        let on_tick = use_callback((), move |_: web_sys::Event, _| {
            if throttle.borrow_mut().ready(utils::now_ms()) {
                classify_now.emit(());
            }
        });
        use_window_event("scroll", on_tick.clone());
        use_window_event("resize", on_tick);
    }

    // 卸载时拆掉可能还挂着的手势监听
    {
        let gesture_listeners = gesture_listeners.clone();
        use_effect_with((), move |_| {
            move || detach_gesture_listeners(&gesture_listeners)
        });
    }

    let onmousedown = {
        let rect = rect.clone();
        let gesture = gesture.clone();
        let gesture_listeners = gesture_listeners.clone();
        let panel_ref = panel_ref.clone();
        Callback::from(move |event: MouseEvent| {
            let from_row = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest(".toc-collapse-btn, .toc-item-text").ok())
                .flatten()
                .is_some();
            if from_row {
                return;
            }
            let Some(origin) = (*rect).or_else(|| panel_rect(&panel_ref)) else {
                return;
            };
            event.prevent_default();

            let (x, y) = (f64::from(event.client_x()), f64::from(event.client_y()));
            let kind = panel::hit_test(x - origin.left, y - origin.top, origin.width, origin.height);
            *gesture.borrow_mut() = Some(Gesture {
                kind,
                origin,
                start_x: x,
                start_y: y,
            });

            let Some(doc) = utils::document() else {
                return;
            };
            let mousemove = {
                let rect = rect.clone();
                let gesture = gesture.clone();
                Closure::wrap(Box::new(move |event: MouseEvent| {
                    let gesture = gesture.borrow();
                    let Some(gesture) = gesture.as_ref() else {
                        return;
                    };
                    let dx = f64::from(event.client_x()) - gesture.start_x;
                    let dy = f64::from(event.client_y()) - gesture.start_y;
                    let viewport = utils::viewport_size();
                    let next = match gesture.kind {
                        GestureKind::Move => panel::apply_move(gesture.origin, dx, dy, viewport),
                        GestureKind::Resize(dir) => {
                            panel::apply_resize(gesture.origin, dir, dx, dy, viewport)
                        },
                    };
                    rect.set(Some(next));
                }) as Box<dyn FnMut(MouseEvent)>)
            };
            let mouseup = {
                let gesture = gesture.clone();
                let gesture_listeners = gesture_listeners.clone();
                Closure::wrap(Box::new(move |_: MouseEvent| {
                    *gesture.borrow_mut() = None;
                    detach_gesture_listeners(&gesture_listeners);
                }) as Box<dyn FnMut(MouseEvent)>)
            };
            let _ = doc.add_event_listener_with_callback(
                "mousemove",
                mousemove.as_ref().unchecked_ref(),
            );
            let _ =
                doc.add_event_listener_with_callback("mouseup", mouseup.as_ref().unchecked_ref());
            detach_gesture_listeners(&gesture_listeners);
            *gesture_listeners.borrow_mut() = Some(GestureListeners {
                mousemove,
                mouseup,
            });
        })
    };

    // 悬停时按命中区域切换光标，提示将要开始的手势
    let onmousemove = {
        let gesture = gesture.clone();
        let panel_ref = panel_ref.clone();
        Callback::from(move |event: MouseEvent| {
            if gesture.borrow().is_some() {
                return;
            }
            let Some(origin) = panel_rect(&panel_ref) else {
                return;
            };
            let kind = panel::hit_test(
                f64::from(event.client_x()) - origin.left,
                f64::from(event.client_y()) - origin.top,
                origin.width,
                origin.height,
            );
            if let Some(element) = panel_ref.cast::<HtmlElement>() {
                let _ = element.style().set_property("cursor", panel::cursor_for(kind));
            }
        })
    };

    let outline = controller.borrow().outline().clone();
    if outline.is_empty() {
        return html! {};
    }

    let container_style = (*rect).map(|r| {
        format!(
            "position: fixed; left: {}px; top: {}px; width: {}px; height: {}px; \
             right: auto; bottom: auto;",
            r.left, r.top, r.width, r.height
        )
    });

    let rows = outline
        .entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let state = classification.states.get(index).copied();
            let active = classification.active == Some(index);
            let style = row_style(entry.level, state, active, entry.hidden);

            let on_collapse_click = {
                let controller = controller.clone();
                let redraw = redraw.clone();
                let classify_now = classify_now.clone();
                Callback::from(move |event: MouseEvent| {
                    event.stop_propagation();
                    if controller.borrow_mut().toggle(index).is_some() {
                        redraw.force_update();
                    }
                    classify_now.emit(());
                })
            };
            let on_label_click = {
                let controller = controller.clone();
                Callback::from(move |event: MouseEvent| {
                    event.stop_propagation();
                    controller.borrow().scroll_to(index);
                })
            };

            // 没有子级的标题不给折叠钮
            let has_scope = outline.scope_end(index) > index + 1;
            let marker = if entry.collapsed { "▸" } else { "▾" };
            html! {
                <div
                    key={index}
                    class={classes!("toc-item", active.then_some("active"))}
                    data-level={entry.level.to_string()}
                    {style}
                >
                    if has_scope {
                        <span class="toc-collapse-btn" onclick={on_collapse_click}>{ marker }</span>
                    } else {
                        <span class="toc-collapse-btn placeholder"></span>
                    }
                    <span class="toc-item-text" onclick={on_label_click}>
                        { entry.label.clone() }
                    </span>
                </div>
            }
        })
        .collect::<Html>();

    html! {
        <div
            ref={panel_ref}
            class="toc-container"
            style={container_style}
            {onmousedown}
            {onmousemove}
        >
            <div class="toc-list">{ rows }</div>
        </div>
    }
}
