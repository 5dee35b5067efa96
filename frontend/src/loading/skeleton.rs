use web_sys::{Document, Element, HtmlImageElement};

use crate::error::UiResult;
use crate::utils::dom;

const LOADED_CLASS: &str = "loaded";

/// Swaps each `.skeleton-image` placeholder for its image once the image is
/// done. A failed load counts as done so the shimmer never runs forever.
pub fn mount(document: &Document) -> UiResult<usize> {
    let images = dom::query_all::<HtmlImageElement>(document, ".skeleton-image img")?;
    let mut pending = 0;
    for image in &images {
        let Some(placeholder) = image.parent_element() else {
            continue;
        };
        if image.complete() {
            mark_loaded(&placeholder);
            continue;
        }
        pending += 1;
        for event in ["load", "error"] {
            let placeholder = placeholder.clone();
            dom::listen::<web_sys::Event, _>(image, event, move |_| mark_loaded(&placeholder))?;
        }
    }
    log::debug!(
        "{} skeleton images, {} still loading",
        images.len(),
        pending
    );
    Ok(images.len())
}

fn mark_loaded(placeholder: &Element) {
    if let Err(e) = dom::add_class(placeholder, LOADED_CLASS) {
        log::warn!("Failed to mark image placeholder loaded: {}", e);
    }
}
