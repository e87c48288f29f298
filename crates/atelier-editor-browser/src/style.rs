//! Inline style bookkeeping helpers.
//!
//! Instrumentation records an element's original inline values before
//! overwriting them, and restoration must be exact: an empty recorded
//! value means the property gets removed, not reset to some default.

use wasm_bindgen::JsCast;
use web_sys::Element;

/// Current inline value of a style property (empty when unset).
pub(crate) fn inline_value(element: &Element, property: &str) -> String {
    element
        .dyn_ref::<web_sys::HtmlElement>()
        .and_then(|el| el.style().get_property_value(property).ok())
        .unwrap_or_default()
}

/// Set an inline style property, ignoring non-HTML elements.
pub(crate) fn set_inline(element: &Element, property: &str, value: &str) {
    if let Some(el) = element.dyn_ref::<web_sys::HtmlElement>() {
        let _ = el.style().set_property(property, value);
    }
}

/// Restore a property to its recorded original: re-set when a value was
/// recorded, remove when the original was empty.
pub(crate) fn restore_inline(element: &Element, property: &str, original: &str) {
    if let Some(el) = element.dyn_ref::<web_sys::HtmlElement>() {
        if original.is_empty() {
            let _ = el.style().remove_property(property);
        } else {
            let _ = el.style().set_property(property, original);
        }
    }
}

/// Drop a `style=""` attribute left behind once every instrumented
/// property has been removed, so teardown is byte-exact for elements
/// that carried no inline style to begin with.
pub(crate) fn tidy_style_attr(element: &Element) {
    if element.get_attribute("style").as_deref() == Some("") {
        let _ = element.remove_attribute("style");
    }
}
