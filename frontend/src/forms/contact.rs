use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlButtonElement, HtmlFormElement, Window};

use crate::config::FormConfig;
use crate::error::UiResult;
use crate::utils::dom;

/// Forms carrying this attribute submit normally.
const OPT_OUT_ATTRIBUTE: &str = "data-native-submit";

/// Takes over form submission: shows a sending state, pretends to wait for a
/// server, thanks the visitor and clears the form. Nothing leaves the page.
pub fn mount(window: &Window, document: &Document, config: &FormConfig) -> UiResult<usize> {
    let forms = dom::query_all::<HtmlFormElement>(document, "form")?;
    let mut mounted = 0;
    for form in forms {
        if form.has_attribute(OPT_OUT_ATTRIBUTE) {
            continue;
        }
        let button = dom::query_within::<HtmlButtonElement>(&form, "button")?;
        let pending = Rc::new(Cell::new(false));
        let window = window.clone();
        let config = config.clone();
        let target = form.clone();
        dom::listen::<web_sys::Event, _>(&form, "submit", move |event| {
            event.prevent_default();
            if pending.replace(true) {
                return;
            }
            let label = button.as_ref().map(|button| {
                let label = button.inner_text();
                if let Err(e) = show_sending(button, &config) {
                    log::warn!("Failed to show sending state: {}", e);
                }
                label
            });

            let form = target.clone();
            let button = button.clone();
            let window = window.clone();
            let config = config.clone();
            let pending = pending.clone();
            spawn_local(async move {
                TimeoutFuture::new(config.submit_delay_ms).await;
                if let Err(e) = window.alert_with_message(&config.confirmation) {
                    log::warn!("Could not show confirmation: {:?}", e);
                }
                if let (Some(button), Some(label)) = (button, label) {
                    if let Err(e) = restore(&button, &label) {
                        log::warn!("Failed to restore submit button: {}", e);
                    }
                }
                form.reset();
                pending.set(false);
            });
        })?;
        mounted += 1;
    }
    log::debug!("Simulated submission bound to {} forms", mounted);
    Ok(mounted)
}

fn show_sending(button: &HtmlButtonElement, config: &FormConfig) -> UiResult<()> {
    button.set_inner_text(&config.sending_label);
    button.set_disabled(true);
    dom::set_style(button, "opacity", &config.sending_opacity)
}

fn restore(button: &HtmlButtonElement, label: &str) -> UiResult<()> {
    button.set_inner_text(label);
    button.set_disabled(false);
    dom::set_style(button, "opacity", "1")
}
