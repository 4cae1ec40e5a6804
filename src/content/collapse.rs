//! Heading scan, collapse affordances and content visibility projection.
//!
//! The controller owns the page's [`Outline`] and the list of heading
//! elements, correlated positionally. Both the in-content collapse buttons
//! and the TOC panel route their toggles through [`CollapseController::toggle`],
//! which mutates the model once and then applies the result to the DOM
//! one-directionally.

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};
use yew::Callback;

use crate::{
    config,
    content::Rebinder,
    outline::Outline,
    utils,
};

/// The article content container, or `None` on pages without one (archive
/// pages included) — those get no TOC and no collapse bindings.
pub fn find_content_root() -> Option<Element> {
    let root = utils::document()?
        .query_selector(config::CONTENT_SELECTOR)
        .ok()??;
    if root.class_list().contains(config::ARCHIVES_CLASS) {
        return None;
    }
    Some(root)
}

type ClickListener = (Element, Closure<dyn FnMut(web_sys::Event)>);

/// Owner of collapse state and its DOM projections.
#[derive(Default)]
pub struct CollapseController {
    headings: Vec<HtmlElement>,
    outline: Outline,
    rebinder: Rebinder,
    listeners: Vec<ClickListener>,
}

impl CollapseController {
    /// An empty controller; populated by [`CollapseController::rescan`].
    pub fn new() -> Self {
        CollapseController::default()
    }

    /// The collapse model, positionally matching the scanned headings.
    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    /// Re-scans the content for headings, assigns missing ids, honors
    /// pre-collapsed markup, and injects a collapse button into every
    /// heading seen for the first time. Idempotent: existing ids are never
    /// reassigned and already-bound headings get no second listener.
    /// Returns whether the outline changed.
    pub fn rescan(&mut self, on_toggle: &Callback<Element>) -> bool {
        let Some(root) = find_content_root() else {
            let had_headings = !self.outline.is_empty();
            self.headings.clear();
            self.outline = Outline::default();
            return had_headings;
        };

        let elements: Vec<HtmlElement> = utils::query_all_in(root.as_ref(), config::HEADING_SELECTOR)
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
            .collect();

        for (index, heading) in elements.iter().enumerate() {
            if heading.id().is_empty() {
                heading.set_id(&format!("{}{}", config::HEADING_ID_PREFIX, index));
            }
        }

        let outline = Outline::from_headings(elements.iter().map(|heading| {
            let level = utils::heading_level(heading).unwrap_or(1);
            let label = heading.text_content().unwrap_or_default().trim().to_string();
            let collapsed = heading.class_list().contains(config::COLLAPSED_CLASS);
            (level, label, collapsed)
        }));

        for heading in &elements {
            if self.rebinder.first_contact(&heading.id()) {
                self.bind_button(heading, on_toggle);
            }
        }

        let changed = outline != self.outline;
        self.headings = elements;
        self.outline = outline;
        changed
    }

    fn bind_button(&mut self, heading: &HtmlElement, on_toggle: &Callback<Element>) {
        let Some(doc) = utils::document() else {
            return;
        };
        let Ok(button) = doc.create_element("span") else {
            return;
        };
        button.set_class_name("collapse-button");
        let _ = heading.insert_before(&button, heading.first_child().as_ref());

        let listener = {
            let on_toggle = on_toggle.clone();
            let heading: Element = heading.clone().into();
            Closure::wrap(Box::new(move |event: web_sys::Event| {
                event.stop_propagation();
                on_toggle.emit(heading.clone());
            }) as Box<dyn FnMut(web_sys::Event)>)
        };
        let _ = button.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref());
        self.listeners.push((button, listener));
    }

    /// Position of a heading element in document order.
    pub fn index_of(&self, element: &Element) -> Option<usize> {
        self.headings
            .iter()
            .position(|heading| heading.as_ref() as &Element == element)
    }

    /// Canonical toggle for both surfaces: flips the model, mirrors the flag
    /// onto the heading's class, and re-projects visibility over the
    /// heading's scope. A toggle on a heading with nothing in scope (the
    /// last heading of the page) flips state with no visible effect.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let collapsed = self.outline.toggle(index)?;
        if let Some(heading) = self.headings.get(index) {
            let class_list = heading.class_list();
            let _ = if collapsed {
                class_list.add_1(config::COLLAPSED_CLASS)
            } else {
                class_list.remove_1(config::COLLAPSED_CLASS)
            };
        }
        self.project(index);
        Some(collapsed)
    }

    /// Applies the model's visibility to the sibling run scoped by the
    /// heading at `index`. Level-aware: a descendant heading that is itself
    /// collapsed keeps its own scope hidden, and the `.tags` block is never
    /// hidden.
    fn project(&self, index: usize) {
        let Some(start) = self.headings.get(index) else {
            return;
        };
        let Some(level) = self.outline.entry(index).map(|e| e.level) else {
            return;
        };

        let mut pos = index;
        let mut content_visible = self.outline.content_visible(index);
        let mut next = start.next_element_sibling();
        while let Some(element) = next {
            if let Some(sibling_level) = utils::heading_level(&element) {
                if sibling_level <= level {
                    break;
                }
                pos += 1;
                let row_visible = self
                    .outline
                    .entry(pos)
                    .map(|e| !e.hidden)
                    .unwrap_or(true);
                utils::set_displayed(&element, row_visible);
                content_visible = self.outline.content_visible(pos);
            } else if element.class_list().contains(config::TAGS_CLASS) {
                utils::set_displayed(&element, true);
            } else {
                utils::set_displayed(&element, content_visible);
            }
            next = element.next_element_sibling();
        }
    }

    /// Smooth-scrolls the heading at `index` to the viewport center.
    pub fn scroll_to(&self, index: usize) {
        if let Some(heading) = self.headings.get(index) {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            options.set_block(ScrollLogicalPosition::Center);
            heading.scroll_into_view_with_scroll_into_view_options(&options);
        }
    }

    /// Absolute vertical extents `(top, bottom)` of every heading, in the
    /// coordinate space the reading classifier expects.
    pub fn extents(&self) -> Vec<(f64, f64)> {
        let scroll = utils::scroll_top();
        self.headings
            .iter()
            .map(|heading| {
                let rect = heading.get_bounding_client_rect();
                (scroll + rect.top(), scroll + rect.bottom())
            })
            .collect()
    }
}

impl Drop for CollapseController {
    fn drop(&mut self) {
        for (button, listener) in self.listeners.drain(..) {
            let _ = button
                .remove_event_listener_with_callback("click", listener.as_ref().unchecked_ref());
            button.remove();
        }
    }
}
