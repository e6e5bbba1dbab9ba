//! Small helpers over web-sys used by the presenters

use cafe_notify::Millis;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, NodeList, Window};

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))
}

/// Current logical time for the notifier, from `performance.now()`
pub fn now() -> Millis {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| Millis::from_f64(p.now()))
        .unwrap_or_default()
}

pub fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn select_all(selector: &str) -> Result<Vec<Element>, JsValue> {
    Ok(elements(&document()?.query_selector_all(selector)?))
}

pub fn select_all_in(root: &Element, selector: &str) -> Result<Vec<Element>, JsValue> {
    Ok(elements(&root.query_selector_all(selector)?))
}

pub fn html_elements(selector: &str) -> Result<Vec<HtmlElement>, JsValue> {
    Ok(select_all(selector)?
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect())
}

pub fn create_html(tag: &str) -> Result<HtmlElement, JsValue> {
    Ok(document()?.create_element(tag)?.dyn_into::<HtmlElement>()?)
}

/// Set one inline style property on an element, if it is an `HtmlElement`
pub fn set_style(el: &Element, property: &str, value: &str) -> Result<(), JsValue> {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        html.style().set_property(property, value)?;
    }
    Ok(())
}

pub fn text_of(root: &Element, selector: &str) -> Result<Option<String>, JsValue> {
    Ok(root
        .query_selector(selector)?
        .and_then(|el| el.text_content())
        .map(|text| text.trim().to_string()))
}

/// Run `f` once after `delay_ms`. Returns the browser's timeout handle.
pub fn set_timeout<F>(delay_ms: u64, f: F) -> Result<i32, JsValue>
where
    F: FnOnce() + 'static,
{
    let callback = Closure::once_into_js(f);
    let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
    window()?.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)
}

pub fn clear_timeout(handle: i32) {
    if let Some(window) = web_sys::window() {
        window.clear_timeout_with_handle(handle);
    }
}

pub fn viewport_height() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_height().ok())
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0)
}

pub fn scroll_y() -> f64 {
    web_sys::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

pub fn warn(context: &str, err: &JsValue) {
    web_sys::console::warn_2(&JsValue::from_str(context), err);
}

pub fn debug(message: &str) {
    web_sys::console::debug_1(&JsValue::from_str(message));
}
