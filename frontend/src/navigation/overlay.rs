use web_sys::{Document, Element, HtmlElement};

use crate::error::UiResult;
use crate::utils::dom;

const TOGGLE_SELECTOR: &str = ".hamburger";
const OVERLAY_SELECTOR: &str = ".mobile-menu-overlay";
const CLOSE_SELECTOR: &str = ".close-menu";
const LINK_SELECTOR: &str = ".mobile-nav-links a";
const OPEN_CLASS: &str = "active";

/// Full-screen mobile menu. While open, the page behind it cannot scroll.
#[derive(Clone)]
pub struct MobileMenu {
    overlay: Element,
    body: Option<HtmlElement>,
}

impl MobileMenu {
    /// Needs the toggle, the overlay and its close button; without all three
    /// the menu stays inert and `Ok(None)` is returned.
    pub fn mount(document: &Document) -> UiResult<Option<Self>> {
        let toggle = dom::query::<Element>(document, TOGGLE_SELECTOR)?;
        let overlay = dom::query::<Element>(document, OVERLAY_SELECTOR)?;
        let close = dom::query::<Element>(document, CLOSE_SELECTOR)?;
        let (Some(toggle), Some(overlay), Some(close)) = (toggle, overlay, close) else {
            log::debug!("Mobile menu markup incomplete, menu disabled");
            return Ok(None);
        };

        let menu = Self {
            overlay,
            body: document.body(),
        };

        let opener = menu.clone();
        dom::listen::<web_sys::Event, _>(&toggle, "click", move |_| opener.report(opener.open()))?;

        let links = dom::query_all::<Element>(document, LINK_SELECTOR)?;
        for target in std::iter::once(&close).chain(links.iter()) {
            let closer = menu.clone();
            dom::listen::<web_sys::Event, _>(target, "click", move |_| {
                closer.report(closer.close())
            })?;
        }

        log::debug!("Mobile menu ready with {} links", links.len());
        Ok(Some(menu))
    }

    pub fn open(&self) -> UiResult<()> {
        dom::add_class(&self.overlay, OPEN_CLASS)?;
        if let Some(body) = &self.body {
            dom::set_style(body, "overflow", "hidden")?;
        }
        Ok(())
    }

    pub fn close(&self) -> UiResult<()> {
        dom::remove_class(&self.overlay, OPEN_CLASS)?;
        if let Some(body) = &self.body {
            dom::clear_style(body, "overflow")?;
        }
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.overlay.class_list().contains(OPEN_CLASS)
    }

    fn report(&self, result: UiResult<()>) {
        if let Err(e) = result {
            log::warn!("Mobile menu update failed: {}", e);
        }
    }
}
