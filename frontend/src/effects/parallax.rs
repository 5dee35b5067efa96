use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

use crate::config::ParallaxConfig;
use crate::error::UiResult;
use crate::utils::dom;

/// Vertical extent of a parallax container in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub top: f64,
    pub height: f64,
}

/// Background translation for a container, or `None` while the container is
/// off screen and its background should be left alone.
pub fn offset(scroll_y: f64, viewport_height: f64, container: Span, speed: f64) -> Option<f64> {
    let visible = scroll_y + viewport_height > container.top
        && scroll_y < container.top + container.height;
    visible.then(|| (scroll_y - container.top) * speed)
}

/// Moves every `.parallax-bg` at a fraction of the scroll speed. Scroll
/// events are coalesced so layout is read at most once per frame.
pub fn mount(window: &Window, document: &Document, config: &ParallaxConfig) -> UiResult<usize> {
    let layers = Rc::new(dom::query_all::<HtmlElement>(document, ".parallax-bg")?);
    if layers.is_empty() {
        return Ok(0);
    }
    let count = layers.len();
    let frame_pending = Rc::new(Cell::new(false));
    let speed = config.speed;

    let scroll_window = window.clone();
    dom::listen::<web_sys::Event, _>(window, "scroll", move |_| {
        if frame_pending.get() {
            return;
        }
        let frame = {
            let window = scroll_window.clone();
            let layers = layers.clone();
            let frame_pending = frame_pending.clone();
            Closure::once_into_js(move || {
                if let Err(e) = draw(&window, &layers, speed) {
                    log::warn!("Parallax frame failed: {}", e);
                }
                frame_pending.set(false);
            })
        };
        match scroll_window.request_animation_frame(frame.unchecked_ref()) {
            Ok(_) => frame_pending.set(true),
            Err(e) => log::warn!("Could not schedule parallax frame: {:?}", e),
        }
    })?;

    log::debug!("Parallax enabled for {} layers", count);
    Ok(count)
}

fn draw(window: &Window, layers: &[HtmlElement], speed: f64) -> UiResult<()> {
    let scroll_y = window.scroll_y()?;
    let viewport_height = dom::viewport_height(window)?;
    for layer in layers {
        let Some(container) = layer
            .parent_element()
            .and_then(|parent| parent.dyn_into::<HtmlElement>().ok())
        else {
            continue;
        };
        let span = Span {
            top: f64::from(container.offset_top()),
            height: f64::from(container.offset_height()),
        };
        if let Some(y) = offset(scroll_y, viewport_height, span, speed) {
            dom::set_style(layer, "transform", &format!("translateY({}px)", y))?;
        }
    }
    Ok(())
}
