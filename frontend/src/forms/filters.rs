use std::rc::Rc;

use web_sys::{Document, Element};

use crate::error::UiResult;
use crate::utils::dom;

/// Radio-style group: the clicked `.filter-btn` becomes the only active one.
pub fn mount(document: &Document) -> UiResult<usize> {
    let buttons = Rc::new(dom::query_all::<Element>(document, ".filter-btn")?);
    for (selected, button) in buttons.iter().enumerate() {
        let group = buttons.clone();
        dom::listen::<web_sys::Event, _>(button, "click", move |_| {
            if let Err(e) = select(&group, selected) {
                log::warn!("Filter selection failed: {}", e);
            }
        })?;
    }
    Ok(buttons.len())
}

fn select(buttons: &[Element], selected: usize) -> UiResult<()> {
    for (i, button) in buttons.iter().enumerate() {
        if i == selected {
            dom::add_class(button, "active")?;
        } else {
            dom::remove_class(button, "active")?;
        }
    }
    Ok(())
}
