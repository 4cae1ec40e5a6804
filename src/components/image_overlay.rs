//! Fullscreen image zoom overlay.
//!
//! Content images are marked zoomable after every content change; clicking
//! one opens this overlay with the full-resolution source. Inside, the wheel
//! zooms about the cursor, dragging pans, and Escape, double click or a
//! backdrop click closes. Window-level listeners exist only while the
//! overlay is open.

use gloo_timers::callback::Timeout;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{HtmlElement, KeyboardEvent, MouseEvent, WheelEvent};
use yew::prelude::*;

use crate::{
    config,
    content::images::{self, ImageListener},
    hooks::use_content_changed,
    i18n, lang,
};

#[derive(Clone, Copy)]
struct ZoomState {
    scale: f64,
    offset_x: f64,
    offset_y: f64,
    dragging: bool,
    last_x: f64,
    last_y: f64,
}

impl Default for ZoomState {
    fn default() -> Self {
        ZoomState {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            dragging: false,
            last_x: 0.0,
            last_y: 0.0,
        }
    }
}

/// Next zoom scale for a wheel tick: a fixed step per notch, clamped to the
/// zoom bounds. Scrolling up zooms in.
fn zoom_step(scale: f64, wheel_delta: f64) -> f64 {
    let delta = if wheel_delta < 0.0 {
        config::ZOOM_WHEEL_STEP
    } else {
        -config::ZOOM_WHEEL_STEP
    };
    (scale + delta).clamp(config::ZOOM_MIN_SCALE, config::ZOOM_MAX_SCALE)
}

fn apply_transform(image: &NodeRef, state: &ZoomState) {
    if let Some(element) = image.cast::<HtmlElement>() {
        let _ = element.style().set_property(
            "transform",
            &format!(
                "translate({}px, {}px) scale({})",
                state.offset_x, state.offset_y, state.scale
            ),
        );
    }
}

#[function_component(ImageZoomOverlay)]
pub fn image_zoom_overlay() -> Html {
    let source = use_state(|| Option::<String>::None);
    let hint_visible = use_state(|| false);
    let zoom = use_mut_ref(ZoomState::default);
    let image_ref = use_node_ref();
    let bound_listeners = use_mut_ref(Vec::<ImageListener>::new);

    // 内容变动后重新标记可缩放图片；use_callback 固定身份避免每次重绘重挂
    {
        let source = source.clone();
        let hint_visible = hint_visible.clone();
        let zoom = zoom.clone();
        let bound_listeners = bound_listeners.clone();
        let on_change = use_callback((), move |_: (), _| {
            let source = source.clone();
            let hint_visible = hint_visible.clone();
            let zoom = zoom.clone();
            let on_open = Callback::from(move |src: String| {
                *zoom.borrow_mut() = ZoomState::default();
                hint_visible.set(true);
                source.set(Some(src));
            });
            bound_listeners
                .borrow_mut()
                .extend(images::bind_zoomable(&on_open));
        });
        use_content_changed(on_change);
    }

    // 卸载时摘掉所有图片上的监听
    {
        let bound_listeners = bound_listeners.clone();
        use_effect_with((), move |_| {
            move || {
                for (element, listener) in bound_listeners.borrow_mut().drain(..) {
                    let _ = element.remove_event_listener_with_callback(
                        "click",
                        listener.as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    let close = {
        let source = source.clone();
        Callback::from(move |_: ()| source.set(None))
    };

    // 打开期间的 window 级监听：Escape 关闭，拖拽跟随鼠标
    {
        let close = close.clone();
        let zoom = zoom.clone();
        let image_ref = image_ref.clone();
        use_effect_with(source.is_some(), move |open| {
            let mut detach: Option<Box<dyn FnOnce()>> = None;
            if *open {
                if let Some(win) = web_sys::window() {
                    let keydown = {
                        let close = close.clone();
                        Closure::wrap(Box::new(move |event: KeyboardEvent| {
                            if event.key() == "Escape" {
                                close.emit(());
                            }
                        }) as Box<dyn FnMut(KeyboardEvent)>)
                    };
                    let mousemove = {
                        let zoom = zoom.clone();
                        let image_ref = image_ref.clone();
                        Closure::wrap(Box::new(move |event: MouseEvent| {
                            let mut state = zoom.borrow_mut();
                            if !state.dragging {
                                return;
                            }
                            let (x, y) = (f64::from(event.client_x()), f64::from(event.client_y()));
                            state.offset_x += x - state.last_x;
                            state.offset_y += y - state.last_y;
                            state.last_x = x;
                            state.last_y = y;
                            apply_transform(&image_ref, &state);
                        }) as Box<dyn FnMut(MouseEvent)>)
                    };
                    let mouseup = {
                        let zoom = zoom.clone();
                        Closure::wrap(Box::new(move |_: MouseEvent| {
                            zoom.borrow_mut().dragging = false;
                        }) as Box<dyn FnMut(MouseEvent)>)
                    };
                    let _ = win.add_event_listener_with_callback(
                        "keydown",
                        keydown.as_ref().unchecked_ref(),
                    );
                    let _ = win.add_event_listener_with_callback(
                        "mousemove",
                        mousemove.as_ref().unchecked_ref(),
                    );
                    let _ = win.add_event_listener_with_callback(
                        "mouseup",
                        mouseup.as_ref().unchecked_ref(),
                    );
                    detach = Some(Box::new(move || {
                        let _ = win.remove_event_listener_with_callback(
                            "keydown",
                            keydown.as_ref().unchecked_ref(),
                        );
                        let _ = win.remove_event_listener_with_callback(
                            "mousemove",
                            mousemove.as_ref().unchecked_ref(),
                        );
                        let _ = win.remove_event_listener_with_callback(
                            "mouseup",
                            mouseup.as_ref().unchecked_ref(),
                        );
                    }));
                }
            }
            move || {
                if let Some(detach) = detach {
                    detach();
                }
            }
        });
    }

    // 提示文字几秒后淡出
    {
        let hint_visible = hint_visible.clone();
        use_effect_with(source.is_some(), move |open| {
            if *open {
                let hint_visible = hint_visible.clone();
                Timeout::new(config::ZOOM_HINT_FADE_MS, move || {
                    hint_visible.set(false);
                })
                .forget();
            }
        });
    }

    let Some(src) = (*source).clone() else {
        return html! {};
    };

    let onwheel = {
        let zoom = zoom.clone();
        let image_ref = image_ref.clone();
        Callback::from(move |event: WheelEvent| {
            event.prevent_default();
            let mut state = zoom.borrow_mut();
            let next = zoom_step(state.scale, event.delta_y());
            let applied = next / state.scale;
            if let Some(element) = image_ref.cast::<HtmlElement>() {
                // 以光标为锚点缩放：光标下的像素保持不动
                let rect = element.get_bounding_client_rect();
                let center_x = rect.left() + rect.width() / 2.0;
                let center_y = rect.top() + rect.height() / 2.0;
                let cursor_x = f64::from(event.client_x()) - center_x;
                let cursor_y = f64::from(event.client_y()) - center_y;
                state.offset_x += cursor_x * (1.0 - applied);
                state.offset_y += cursor_y * (1.0 - applied);
            }
            state.scale = next;
            apply_transform(&image_ref, &state);
        })
    };

    let onmousedown = {
        let zoom = zoom.clone();
        Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            let mut state = zoom.borrow_mut();
            state.dragging = true;
            state.last_x = f64::from(event.client_x());
            state.last_y = f64::from(event.client_y());
        })
    };

    let on_backdrop_click = {
        let close = close.clone();
        Callback::from(move |event: MouseEvent| {
            let is_backdrop = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
                .is_some_and(|el| el.class_list().contains("image-zoom-overlay"));
            if is_backdrop {
                close.emit(());
            }
        })
    };

    let ondblclick = {
        let close = close.clone();
        Callback::from(move |_: MouseEvent| close.emit(()))
    };

    let hint = i18n::lookup(lang::preferred_language(), "zoomHint").unwrap_or_default();
    let hint_class = if *hint_visible {
        "image-zoom-hint"
    } else {
        "image-zoom-hint faded"
    };

    html! {
        <div class="image-zoom-overlay" onclick={on_backdrop_click} {ondblclick}>
            <img
                ref={image_ref}
                class="image-zoom-target"
                src={src}
                {onwheel}
                {onmousedown}
            />
            <div class={hint_class}>{ hint }</div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_ticks_change_the_scale_by_a_fixed_step() {
        let zoomed_in = zoom_step(1.0, -53.0);
        assert!((zoomed_in - (1.0 + config::ZOOM_WHEEL_STEP)).abs() < f64::EPSILON);
        let zoomed_out = zoom_step(zoomed_in, 53.0);
        assert!((zoomed_out - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zoom_is_clamped_to_its_bounds() {
        assert_eq!(zoom_step(config::ZOOM_MIN_SCALE, 53.0), config::ZOOM_MIN_SCALE);
        assert_eq!(zoom_step(0.25, 53.0), config::ZOOM_MIN_SCALE);
        assert_eq!(zoom_step(config::ZOOM_MAX_SCALE, -53.0), config::ZOOM_MAX_SCALE);
        assert_eq!(zoom_step(5.95, -53.0), config::ZOOM_MAX_SCALE);
    }
}
