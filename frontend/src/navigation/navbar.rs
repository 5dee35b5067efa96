use web_sys::{Document, HtmlElement, Window};

use crate::config::NavbarConfig;
use crate::error::UiResult;
use crate::utils::dom;

/// Box shadow for the navbar at a given scroll position.
pub fn shadow_for(scroll_y: f64, config: &NavbarConfig) -> &str {
    if scroll_y > config.shadow_after_px {
        &config.shadow
    } else {
        "none"
    }
}

/// Lifts the navbar off the page with a shadow once the user scrolls.
pub fn mount(window: &Window, document: &Document, config: &NavbarConfig) -> UiResult<bool> {
    let Some(navbar) = dom::query::<HtmlElement>(document, ".navbar")? else {
        return Ok(false);
    };
    let apply = {
        let window = window.clone();
        let config = config.clone();
        move || -> UiResult<()> {
            let scroll_y = window.scroll_y()?;
            dom::set_style(&navbar, "box-shadow", shadow_for(scroll_y, &config))
        }
    };
    apply()?;
    dom::listen::<web_sys::Event, _>(window, "scroll", move |_| {
        if let Err(e) = apply() {
            log::warn!("Navbar shadow update failed: {}", e);
        }
    })?;
    Ok(true)
}
