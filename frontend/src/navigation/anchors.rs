use web_sys::{Document, Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use super::overlay::MobileMenu;
use crate::error::UiResult;
use crate::utils::dom;

/// Id referenced by an in-page link, or `None` for a bare `#`.
pub fn fragment_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Makes every `href="#..."` link scroll smoothly to its target instead of
/// jumping, closing the mobile menu on the way. Returns the number of links.
pub fn mount(document: &Document, menu: Option<MobileMenu>) -> UiResult<usize> {
    let anchors = dom::query_all::<Element>(document, "a[href^=\"#\"]")?;
    for anchor in &anchors {
        let document = document.clone();
        let menu = menu.clone();
        let link = anchor.clone();
        dom::listen::<web_sys::Event, _>(anchor, "click", move |event| {
            event.prevent_default();
            let Some(href) = link.get_attribute("href") else {
                return;
            };
            let Some(id) = fragment_target(&href) else {
                return;
            };
            if let Some(target) = document.get_element_by_id(id) {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                options.set_block(ScrollLogicalPosition::Start);
                target.scroll_into_view_with_scroll_into_view_options(&options);
            }
            if let Some(menu) = menu.as_ref().filter(|menu| menu.is_open()) {
                if let Err(e) = menu.close() {
                    log::warn!("Failed to close mobile menu after anchor click: {}", e);
                }
            }
        })?;
    }
    log::debug!("Smooth scrolling bound to {} anchors", anchors.len());
    Ok(anchors.len())
}
