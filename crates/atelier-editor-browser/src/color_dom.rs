//! Utility color classes on live elements.
//!
//! The DOM class list is the single source of truth for an element's
//! colors; this module is the only place that touches it. All matching
//! decisions are delegated to the pure planning functions in
//! `atelier-editor-core` so the browser side stays a thin applier.

use atelier_editor_core::{
    ColorChoice, ColorRole, ElementColorState, plan_color_update, scan_colors,
};
use web_sys::Element;

/// Tags that are never directly colorable: coloring a single inline text
/// run is usually not what a right-click meant, so these retarget to
/// their nearest structural ancestor.
const BARE_TEXT_TAGS: [&str; 15] = [
    "H1", "H2", "H3", "H4", "H5", "H6", "SPAN", "P", "LABEL", "EM", "STRONG", "B", "I", "SMALL",
    "MARK",
];

/// Structural containers that may receive colors.
const COLORABLE_SELECTOR: &str = "div, section, footer, header, article, aside, main, nav, form";

fn class_tokens(element: &Element) -> Vec<String> {
    element
        .class_name()
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

/// Apply a color choice to an element's class list.
///
/// Removes every existing color class of the role first, then adds the
/// chosen class (none for [`ColorChoice::Clear`]). A border color on an
/// element with no border width class also gets the bare `border`
/// utility, otherwise the color would be invisible. Safe to call twice
/// with the same class.
pub fn apply_color_class(element: &Element, choice: &ColorChoice, role: ColorRole) {
    let tokens = class_tokens(element);
    let plan = plan_color_update(tokens.iter().map(String::as_str), role, choice);

    let list = element.class_list();
    for token in &plan.remove {
        let _ = list.remove_1(token);
    }
    if let Some(add) = &plan.add {
        let _ = list.add_1(add);
    }
    if plan.add_border_width {
        let _ = list.add_1("border");
    }

    tracing::trace!(
        role = role.prefix(),
        removed = plan.remove.len(),
        added = ?plan.add,
        "applied color class"
    );
}

/// Read the element's current colors from its class list. Never mutates.
pub fn get_current_colors(element: &Element) -> ElementColorState {
    let tokens = class_tokens(element);
    scan_colors(tokens.iter().map(String::as_str))
}

/// Resolve the colorable element at viewport point `(x, y)` inside
/// `container`, or `None` when the point is outside it or nothing
/// colorable encloses it.
pub fn find_target_element(container: &Element, x: i32, y: i32) -> Option<Element> {
    let clicked = gloo_utils::document().element_from_point(x as f32, y as f32)?;
    resolve_target(container, &clicked)
}

/// Resolve a clicked element to its colorable target.
///
/// Bare text tags retarget to their nearest allow-listed ancestor; the
/// result must still lie within `container`.
pub fn resolve_target(container: &Element, clicked: &Element) -> Option<Element> {
    if !container.contains(Some(clicked.as_ref())) {
        return None;
    }

    let start = if BARE_TEXT_TAGS.contains(&clicked.tag_name().as_str()) {
        clicked.parent_element()?
    } else {
        clicked.clone()
    };

    let target = start.closest(COLORABLE_SELECTOR).ok().flatten()?;
    if container.contains(Some(target.as_ref())) {
        Some(target)
    } else {
        None
    }
}
