//! Client-side behavior for the marketing site.
//!
//! The page is server-rendered; this crate only attaches behavior to markup
//! that is already there. Each feature looks for its own elements and stays
//! inactive when they are missing, so any page can load the same bundle.

pub mod carousel;
pub mod config;
pub mod effects;
pub mod error;
pub mod forms;
pub mod loading;
pub mod navigation;
pub mod utils;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use crate::carousel::Carousel;
use crate::config::SiteConfig;
use crate::error::UiResult;
use crate::navigation::MobileMenu;
use crate::utils::dom;

#[wasm_bindgen(start)]
pub fn start() {
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    wasm_logger::init(wasm_logger::Config::new(level));

    if let Err(e) = schedule_boot() {
        log::error!("Site scripts failed to start: {}", e);
    }
}

/// Boots now if the document is parsed, otherwise on `DOMContentLoaded`.
fn schedule_boot() -> UiResult<()> {
    let window = dom::window()?;
    let document = dom::document()?;
    if document.ready_state() == "loading" {
        let target = document.clone();
        dom::listen::<web_sys::Event, _>(&target, "DOMContentLoaded", move |_| {
            boot(&window, &document)
        })?;
    } else {
        boot(&window, &document);
    }
    Ok(())
}

/// Starts every feature. A feature that fails to start is logged and skipped;
/// the rest still run.
pub fn boot(window: &Window, document: &Document) {
    let config = SiteConfig::load(document);

    let menu = report("mobile menu", MobileMenu::mount(document)).flatten();
    report("anchor scrolling", navigation::anchors::mount(document, menu));
    report("navbar shadow", navigation::navbar::mount(window, document, &config.navbar));
    report("preloader", loading::preloader::mount(document, &config.loader));
    report("skeleton images", loading::skeleton::mount(document));
    report("carousel", Carousel::mount(window, document, &config.carousel));
    report("scroll reveal", effects::reveal::mount(document, &config.reveal));
    report("parallax", effects::parallax::mount(window, document, &config.parallax));
    report("card tilt", effects::tilt::mount(document, &config.tilt));
    report("date fields", forms::date_field::mount(document));
    report("contact forms", forms::contact::mount(window, document, &config.forms));
    report("filter buttons", forms::filters::mount(document));

    log::info!("Site scripts ready");
}

fn report<T>(feature: &str, result: UiResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Could not start {}: {}", feature, e);
            None
        }
    }
}
