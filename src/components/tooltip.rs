//! Hover tooltips for navigation links carrying a `data-title` attribute.

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Element, MouseEvent};
use yew::prelude::*;

#[derive(Clone, PartialEq)]
struct Tip {
    text: String,
    left: f64,
    top: f64,
    min_width: f64,
}

fn tip_anchor(event: &MouseEvent) -> Option<Element> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let anchor = target.closest("a[data-title]").ok()??;
    let title = anchor.get_attribute("data-title")?;
    (!title.trim().is_empty()).then_some(anchor)
}

/// Renders the single floating tooltip, tracked through document-level
/// `mouseover`/`mouseout` so tooltips follow content swapped in later.
#[function_component(TooltipLayer)]
pub fn tooltip_layer() -> Html {
    let tip = use_state(|| Option::<Tip>::None);

    {
        let tip = tip.clone();
        use_effect_with((), move |_| {
            let document = web_sys::window().and_then(|w| w.document());
            let over = {
                let tip = tip.clone();
                Closure::wrap(Box::new(move |event: MouseEvent| {
                    let Some(anchor) = tip_anchor(&event) else {
                        return;
                    };
                    let Some(text) = anchor.get_attribute("data-title") else {
                        return;
                    };
                    let rect = anchor.get_bounding_client_rect();
                    tip.set(Some(Tip {
                        text,
                        left: rect.left() + rect.width() / 2.0,
                        top: rect.top() - 6.0,
                        min_width: rect.width(),
                    }));
                }) as Box<dyn FnMut(MouseEvent)>)
            };
            let out = {
                let tip = tip.clone();
                Closure::wrap(Box::new(move |event: MouseEvent| {
                    if tip_anchor(&event).is_some() {
                        tip.set(None);
                    }
                }) as Box<dyn FnMut(MouseEvent)>)
            };
            if let Some(doc) = document.as_ref() {
                let _ = doc
                    .add_event_listener_with_callback("mouseover", over.as_ref().unchecked_ref());
                let _ =
                    doc.add_event_listener_with_callback("mouseout", out.as_ref().unchecked_ref());
            }
            move || {
                if let Some(doc) = document {
                    let _ = doc.remove_event_listener_with_callback(
                        "mouseover",
                        over.as_ref().unchecked_ref(),
                    );
                    let _ = doc.remove_event_listener_with_callback(
                        "mouseout",
                        out.as_ref().unchecked_ref(),
                    );
                }
                drop(over);
                drop(out);
            }
        });
    }

    match &*tip {
        Some(tip) => {
            let style = format!(
                "position: fixed; left: {}px; top: {}px; min-width: {}px; \
                 transform: translate(-50%, -100%); z-index: 1000; pointer-events: none;",
                tip.left, tip.top, tip.min_width
            );
            html! {
                <span class="tooltip" style={style}>{ tip.text.clone() }</span>
            }
        },
        None => html! {},
    }
}
