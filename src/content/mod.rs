//! Bindings over the server-rendered article DOM.
//!
//! Content arrives from the static site generator; this layer only observes
//! and decorates it. A single mutation observer turns DOM injection into an
//! explicit content-changed notification that every binder subscribes to,
//! and each binder skips elements it already processed so repeated
//! notifications stay bounded.

pub mod code_block;
pub mod collapse;
pub mod images;
pub mod map;
pub mod shadertoy;

use std::collections::HashSet;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{CustomEvent, MutationObserver, MutationObserverInit, MutationRecord};

use crate::{config, utils};

/// Installs a mutation observer on `body` that fires the content-changed
/// document event whenever element nodes are added anywhere in the page.
/// Returns the observer (kept alive by the caller) or `None` when there is
/// no document to observe.
pub fn install_observer() -> Option<(MutationObserver, Closure<dyn FnMut(js_sys::Array)>)> {
    let doc = utils::document()?;
    let body = doc.body()?;

    let closure = Closure::wrap(Box::new(move |records: js_sys::Array| {
        let added = records.iter().any(|record| {
            record
                .dyn_ref::<MutationRecord>()
                .is_some_and(|r| r.added_nodes().length() > 0)
        });
        if !added {
            return;
        }
        if let Some(doc) = utils::document() {
            if let Ok(event) = CustomEvent::new(config::CONTENT_CHANGED_EVENT) {
                let _ = doc.dispatch_event(&event);
            }
        }
    }) as Box<dyn FnMut(js_sys::Array)>);

    let observer = MutationObserver::new(closure.as_ref().unchecked_ref()).ok()?;
    let init = MutationObserverInit::new();
    init.set_child_list(true);
    init.set_subtree(true);
    observer.observe_with_options(&body, &init).ok()?;
    Some((observer, closure))
}

/// Tracks which keys a binder has already processed, so a rebinding pass
/// invoked twice over an unchanged page binds nothing the second time.
#[derive(Debug, Default)]
pub struct Rebinder {
    seen: HashSet<String>,
}

impl Rebinder {
    /// An empty rebinder.
    pub fn new() -> Self {
        Rebinder::default()
    }

    /// Whether `key` is seen here for the first time; marks it seen.
    pub fn first_contact(&mut self, key: &str) -> bool {
        self.seen.insert(key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_second_pass_over_the_same_keys_binds_nothing() {
        let mut rebinder = Rebinder::new();
        let keys = ["heading-0", "heading-1", "heading-2"];
        let mut bound = 0;
        for key in keys {
            if rebinder.first_contact(key) {
                bound += 1;
            }
        }
        assert_eq!(bound, 3);
        for key in keys {
            if rebinder.first_contact(key) {
                bound += 1;
            }
        }
        assert_eq!(bound, 3, "second pass must not bind again");
    }

    #[test]
    fn new_keys_are_still_picked_up_after_a_rescan() {
        let mut rebinder = Rebinder::new();
        assert!(rebinder.first_contact("a"));
        assert!(!rebinder.first_contact("a"));
        assert!(rebinder.first_contact("b"));
    }
}
