//! Export serialization: strip editor instrumentation from live markup
//! and assemble the published document, plus the container-marking pass
//! that tags design roots for the selection protocol.

use atelier_editor_core::markers;
use atelier_editor_core::{Design, document_shell, wrap_section};
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::style;

/// Delay before marking freshly rendered design containers, leaving the
/// renderer time to commit the subtree.
pub const CONTAINER_MARK_DELAY_MS: u32 = 500;

/// Produce a clean copy of `html` with every trace of editor
/// instrumentation removed. The live DOM is never touched: the markup
/// is parsed into a detached scratch element and cleaned there.
pub fn clean_html_for_export(html: &str) -> String {
    let Ok(scratch) = gloo_utils::document().create_element("div") else {
        return html.to_string();
    };
    scratch.set_inner_html(html);
    strip_instrumentation(&scratch);
    scratch.inner_html()
}

/// Remove editor-injected attributes and inline styles from every
/// element under `root` (root excluded, matching what `set_inner_html`
/// parsed in).
pub fn strip_instrumentation(root: &Element) {
    if let Ok(nodes) = root.query_selector_all("[contenteditable]") {
        for i in 0..nodes.length() {
            if let Some(element) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                let _ = element.remove_attribute("contenteditable");
            }
        }
    }

    let selector = markers::INSTRUMENTATION_ATTRS
        .iter()
        .map(|attr| format!("[{attr}]"))
        .collect::<Vec<_>>()
        .join(", ");

    let Ok(nodes) = root.query_selector_all(&selector) else {
        return;
    };
    for i in 0..nodes.length() {
        let Some(element) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        for attr in markers::INSTRUMENTATION_ATTRS {
            let _ = element.remove_attribute(attr);
        }
        for property in markers::INSTRUMENTATION_STYLES {
            style::restore_inline(&element, property, "");
        }
        style::tidy_style_attr(&element);
    }
}

/// Assemble the full published document from slot assignments, in slot
/// order. Unassigned slots are omitted entirely.
pub fn export_document(title: &str, slots: &[(String, Option<Design>)]) -> String {
    let sections = slots
        .iter()
        .filter_map(|(name, design)| {
            let design = design.as_ref()?;
            Some(wrap_section(name, &clean_html_for_export(&design.html)))
        })
        .collect::<Vec<_>>()
        .join("\n");

    tracing::debug!(title, sections = slots.len(), "document exported");
    document_shell(title, &sections)
}

/// Mark every element matching `selector` as a design container and
/// normalize any pre-rendered contenteditable descendants to the
/// editable state.
pub fn mark_design_containers(selector: &str) {
    let Ok(nodes) = gloo_utils::document().query_selector_all(selector) else {
        tracing::warn!(selector, "container marking selector failed");
        return;
    };
    for i in 0..nodes.length() {
        let Some(container) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let _ = container.set_attribute(markers::DESIGN_CONTAINER, "true");
        if let Ok(editables) = container.query_selector_all("[contenteditable]") {
            for j in 0..editables.length() {
                if let Some(element) =
                    editables.get(j).and_then(|n| n.dyn_into::<Element>().ok())
                {
                    let _ = element.set_attribute("contenteditable", "true");
                }
            }
        }
    }
}

/// Schedule [`mark_design_containers`] after the render-settle delay.
/// Dropping the returned handle cancels the pass.
pub fn mark_design_containers_later(selector: &str) -> Timeout {
    let selector = selector.to_owned();
    Timeout::new(CONTAINER_MARK_DELAY_MS, move || {
        mark_design_containers(&selector)
    })
}
