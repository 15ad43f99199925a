//! Thin helpers over `web_sys` for element lookup, listeners and styles.

use interactions::styles::InjectedStyle;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{js_sys, Document, Element, Event, EventTarget, HtmlElement, NodeList, Window};

use crate::error::FrontendError;

pub(crate) fn window() -> Result<Window, FrontendError> {
    web_sys::window().ok_or(FrontendError::NoWindow)
}

pub(crate) fn document() -> Result<Document, FrontendError> {
    window()?.document().ok_or(FrontendError::NoDocument)
}

pub(crate) fn body() -> Result<HtmlElement, FrontendError> {
    document()?
        .body()
        .ok_or_else(|| FrontendError::MissingElement("<body>".to_string()))
}

/// Looks up `#id` and casts it to the expected element type.
pub(crate) fn by_id<T: JsCast>(id: &str) -> Result<T, FrontendError> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| FrontendError::MissingElement(format!("#{}", id)))?
        .dyn_into::<T>()
        .map_err(|_| FrontendError::UnexpectedElement(format!("#{}", id)))
}

/// All elements matching `selector`, in document order.
pub(crate) fn select_all(selector: &str) -> Result<Vec<HtmlElement>, FrontendError> {
    Ok(html_elements(document()?.query_selector_all(selector)?))
}

pub(crate) fn select_within(
    parent: &Element,
    selector: &str,
) -> Result<Vec<HtmlElement>, FrontendError> {
    Ok(html_elements(parent.query_selector_all(selector)?))
}

fn html_elements(list: NodeList) -> Vec<HtmlElement> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

/// Attaches `handler` for the lifetime of the page.
pub(crate) fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), FrontendError> {
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

/// `document.readyState`: `loading`, `interactive` or `complete`.
pub(crate) fn ready_state(document: &Document) -> Result<String, FrontendError> {
    let state = js_sys::Reflect::get(document, &JsValue::from_str("readyState"))?;
    Ok(state.as_string().unwrap_or_default())
}

/// Runs `init` once the DOM is parsed, immediately if it already is.
pub(crate) fn on_ready(init: impl FnOnce() + 'static) -> Result<(), FrontendError> {
    let document = document()?;
    if ready_state(&document)? == "loading" {
        let callback = Closure::once_into_js(init);
        document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())?;
    } else {
        init();
    }
    Ok(())
}

/// Inserts the style block unless an element with its id already exists.
pub(crate) fn ensure_style(style: &InjectedStyle) -> Result<(), FrontendError> {
    let document = document()?;
    if document.get_element_by_id(style.id).is_some() {
        return Ok(());
    }
    let head = document
        .head()
        .ok_or_else(|| FrontendError::MissingElement("<head>".to_string()))?;
    let element = document.create_element("style")?;
    element.set_id(style.id);
    element.set_text_content(Some(style.css));
    head.append_child(&element)?;
    Ok(())
}

/// Best-effort message for a thrown JS value.
pub(crate) fn describe(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
