use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlElement, NodeList, Window};

use crate::error::{UiError, UiResult};

pub fn window() -> UiResult<Window> {
    web_sys::window().ok_or(UiError::MissingWindow)
}

pub fn document() -> UiResult<Document> {
    window()?.document().ok_or(UiError::MissingDocument)
}

/// First element matching `selector`, if there is one of type `T`.
pub fn query<T: JsCast>(document: &Document, selector: &str) -> UiResult<Option<T>> {
    Ok(document
        .query_selector(selector)?
        .and_then(|element| element.dyn_into::<T>().ok()))
}

/// Same as [`query`], scoped to the descendants of `root`.
pub fn query_within<T: JsCast>(root: &Element, selector: &str) -> UiResult<Option<T>> {
    Ok(root
        .query_selector(selector)?
        .and_then(|element| element.dyn_into::<T>().ok()))
}

/// Every element matching `selector` that has type `T`, in document order.
pub fn query_all<T: JsCast>(document: &Document, selector: &str) -> UiResult<Vec<T>> {
    Ok(collect(document.query_selector_all(selector)?))
}

pub fn query_all_within<T: JsCast>(root: &Element, selector: &str) -> UiResult<Vec<T>> {
    Ok(collect(root.query_selector_all(selector)?))
}

fn collect<T: JsCast>(list: NodeList) -> Vec<T> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

/// Registers `handler` for `event` on `target` for the rest of the page's
/// lifetime. Events that are not a `E` are ignored.
pub fn listen<E, F>(target: &EventTarget, event: &str, mut handler: F) -> UiResult<()>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
        if let Ok(event) = event.dyn_into::<E>() {
            handler(event);
        }
    });
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) -> UiResult<()> {
    element.style().set_property(property, value)?;
    Ok(())
}

pub fn clear_style(element: &HtmlElement, property: &str) -> UiResult<()> {
    element.style().remove_property(property)?;
    Ok(())
}

pub fn add_class(element: &Element, class: &str) -> UiResult<()> {
    element.class_list().add_1(class)?;
    Ok(())
}

pub fn remove_class(element: &Element, class: &str) -> UiResult<()> {
    element.class_list().remove_1(class)?;
    Ok(())
}

pub fn viewport_width(window: &Window) -> UiResult<f64> {
    Ok(window.inner_width()?.as_f64().unwrap_or_default())
}

pub fn viewport_height(window: &Window) -> UiResult<f64> {
    Ok(window.inner_height()?.as_f64().unwrap_or_default())
}

/// True when `event` was dispatched on `element` itself rather than bubbling
/// up from a descendant.
pub fn targets(event: &web_sys::Event, element: &Element) -> bool {
    event
        .target()
        .map_or(false, |target| JsValue::from(target) == JsValue::from(element.clone()))
}
