use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{AddEventListenerOptions, Document, Element, EventTarget, HtmlElement, NodeList, Window};

use crate::error::SiteError;

pub fn window() -> Result<Window, SiteError> {
    web_sys::window().ok_or(SiteError::NoWindow)
}

pub fn document(window: &Window) -> Result<Document, SiteError> {
    window.document().ok_or(SiteError::NoWindow)
}

/// Anything `querySelector` can be called on.
pub trait Query {
    fn select(&self, selector: &str) -> Result<Option<Element>, JsValue>;
    fn select_all(&self, selector: &str) -> Result<NodeList, JsValue>;
}

impl Query for Document {
    fn select(&self, selector: &str) -> Result<Option<Element>, JsValue> {
        self.query_selector(selector)
    }

    fn select_all(&self, selector: &str) -> Result<NodeList, JsValue> {
        self.query_selector_all(selector)
    }
}

impl Query for Element {
    fn select(&self, selector: &str) -> Result<Option<Element>, JsValue> {
        self.query_selector(selector)
    }

    fn select_all(&self, selector: &str) -> Result<NodeList, JsValue> {
        self.query_selector_all(selector)
    }
}

pub fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<T>().ok())
}

pub fn query<T: JsCast>(root: &impl Query, selector: &str) -> Result<Option<T>, SiteError> {
    Ok(root
        .select(selector)?
        .and_then(|element| element.dyn_into::<T>().ok()))
}

/// Matches in document order; nodes that are not a `T` are skipped.
pub fn query_all<T: JsCast>(root: &impl Query, selector: &str) -> Result<Vec<T>, SiteError> {
    let list = root.select_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect())
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) -> Result<(), SiteError> {
    element.style().set_property(property, value)?;
    Ok(())
}

/// Attaches a handler for the lifetime of the page.
pub fn listen<E>(target: &EventTarget, event: &str, handler: impl FnMut(E) + 'static) -> Result<(), SiteError>
where
    E: FromWasmAbi + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

pub fn listen_passive<E>(target: &EventTarget, event: &str, handler: impl FnMut(E) + 'static) -> Result<(), SiteError>
where
    E: FromWasmAbi + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        callback.as_ref().unchecked_ref(),
        &options,
    )?;
    callback.forget();
    Ok(())
}

/// Errors raised inside event handlers have nowhere to propagate to.
pub fn log_failure(context: &str, result: Result<(), SiteError>) {
    if let Err(e) = result {
        warn!("{}: {}", context, e);
    }
}

pub fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

pub fn inner_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|width| width.as_f64())
        .unwrap_or(0.0)
}

pub fn inner_height(window: &Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|height| height.as_f64())
        .unwrap_or(0.0)
}
