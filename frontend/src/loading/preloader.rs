use gloo_timers::callback::Timeout;
use web_sys::{Document, HtmlElement};

use crate::config::LoaderConfig;
use crate::error::UiResult;
use crate::utils::dom;

/// Keeps the branded splash up for `splash_ms`, fades it, then takes it out
/// of the layout once the fade is over.
pub fn mount(document: &Document, config: &LoaderConfig) -> UiResult<bool> {
    let Some(preloader) = dom::query::<HtmlElement>(document, ".preloader")? else {
        return Ok(false);
    };
    let fade_ms = config.fade_ms;
    Timeout::new(config.splash_ms, move || {
        if let Err(e) = dom::add_class(&preloader, "hidden") {
            log::warn!("Failed to fade preloader: {}", e);
        }
        Timeout::new(fade_ms, move || {
            if let Err(e) = dom::set_style(&preloader, "display", "none") {
                log::warn!("Failed to remove preloader: {}", e);
            }
        })
        .forget();
    })
    .forget();
    Ok(true)
}
