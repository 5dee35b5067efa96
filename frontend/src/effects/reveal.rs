use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::config::RevealConfig;
use crate::error::UiResult;
use crate::utils::dom;

/// An element the reveal observer reports on.
trait Revealable {
    fn is_revealed(&self, active_class: &str) -> bool;
    fn reveal(&self, active_class: &str) -> UiResult<()>;
    fn stop_watching(&self);
}

struct Observed<'a> {
    element: Element,
    observer: &'a IntersectionObserver,
}

impl Revealable for Observed<'_> {
    fn is_revealed(&self, active_class: &str) -> bool {
        self.element.class_list().contains(active_class)
    }

    fn reveal(&self, active_class: &str) -> UiResult<()> {
        dom::add_class(&self.element, active_class)
    }

    fn stop_watching(&self) {
        self.observer.unobserve(&self.element);
    }
}

/// Handles one visibility report. The first time the element is in view it
/// gets `active_class` and is no longer watched; nothing ever removes the
/// class. Returns whether this report revealed the element.
fn on_intersection(target: &impl Revealable, intersecting: bool, active_class: &str) -> bool {
    if !intersecting {
        return false;
    }
    target.stop_watching();
    if target.is_revealed(active_class) {
        return false;
    }
    match target.reveal(active_class) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Failed to reveal element: {}", e);
            false
        }
    }
}

/// `.a, .b, .c` selector matching any of the reveal classes.
pub fn selector(classes: &[String]) -> String {
    classes
        .iter()
        .map(|class| format!(".{}", class))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Plays each element's entrance animation the first time it scrolls into
/// view. Revealed elements are no longer observed, so the animation never
/// replays. Returns the number of elements being watched.
pub fn mount(document: &Document, config: &RevealConfig) -> UiResult<usize> {
    if config.classes.is_empty() {
        return Ok(0);
    }
    let targets = dom::query_all::<Element>(document, &selector(&config.classes))?;
    if targets.is_empty() {
        return Ok(0);
    }

    let active_class = config.active_class.clone();
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = Observed {
                    element: entry.target(),
                    observer: &observer,
                };
                on_intersection(&target, entry.is_intersecting(), &active_class);
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(config.threshold));
    options.set_root_margin(&config.root_margin);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();

    for target in &targets {
        observer.observe(target);
    }
    log::debug!("Watching {} elements for reveal", targets.len());
    Ok(targets.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    struct FakeElement {
        classes: RefCell<Vec<String>>,
        watched: Cell<bool>,
        reveals: Cell<usize>,
    }

    impl FakeElement {
        fn new() -> Self {
            Self {
                classes: RefCell::new(vec!["reveal-fade".to_string()]),
                watched: Cell::new(true),
                reveals: Cell::new(0),
            }
        }
    }

    impl Revealable for FakeElement {
        fn is_revealed(&self, active_class: &str) -> bool {
            self.classes.borrow().iter().any(|class| class == active_class)
        }

        fn reveal(&self, active_class: &str) -> UiResult<()> {
            self.reveals.set(self.reveals.get() + 1);
            self.classes.borrow_mut().push(active_class.to_string());
            Ok(())
        }

        fn stop_watching(&self) {
            self.watched.set(false);
        }
    }

    #[test]
    fn hidden_element_stays_pending() {
        let element = FakeElement::new();
        assert!(!on_intersection(&element, false, "active"));
        assert!(element.watched.get());
        assert!(!element.is_revealed("active"));
    }

    #[test]
    fn reveal_happens_once_and_sticks() {
        let element = FakeElement::new();
        let reports = [false, true, true, false, true];
        let revealed: Vec<bool> = reports
            .iter()
            .map(|&visible| on_intersection(&element, visible, "active"))
            .collect();

        assert_eq!(revealed, vec![false, true, false, false, false]);
        assert_eq!(element.reveals.get(), 1);
        assert!(element.is_revealed("active"));
        assert!(!element.watched.get());
    }

    #[test]
    fn selector_joins_every_class() {
        let config = RevealConfig::default();
        assert_eq!(
            selector(&config.classes),
            ".reveal-on-scroll, .reveal-fade, .reveal-scale, .reveal-pop, .reveal-slide-left, .reveal-slide-right"
        );
    }
}
