//! The selection protocol: a typed channel between anything that wants
//! to recolor an element and whatever renders the color picker.
//!
//! Producers are the editable-content controller's context-menu handler
//! (coordinates only, target resolved lazily) and toolbar controls that
//! already hold an element reference. The single consumer resolves the
//! final target and opens the picker. There is no queue: requests
//! dispatch synchronously and the most recent one simply supersedes
//! whatever selection was active before.

use atelier_editor_core::ColorRole;
use atelier_editor_core::markers;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::Element;

use crate::style;

/// "The user wants to recolor something here."
#[derive(Clone)]
pub struct SelectionRequest {
    /// The design container the request originated in.
    pub container: Element,
    /// Viewport coordinates of the triggering interaction.
    pub x: i32,
    pub y: i32,
    /// Direct target, when the producer already holds one (toolbar).
    /// Absent for context-menu requests, which resolve from the point.
    pub target: Option<Element>,
    /// Role to pre-expand in the picker, when the producer knows it.
    pub preferred_role: Option<ColorRole>,
}

type Consumer = Rc<dyn Fn(SelectionRequest)>;

/// Single-consumer broadcast channel for selection requests.
///
/// Cloning shares the channel. A request published with no consumer
/// installed is dropped; that is not an error, just nothing listening
/// yet.
#[derive(Clone, Default)]
pub struct SelectionBus {
    consumer: Rc<RefCell<Option<Consumer>>>,
}

impl SelectionBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the consumer, replacing any previous one.
    pub fn subscribe(&self, consumer: impl Fn(SelectionRequest) + 'static) {
        *self.consumer.borrow_mut() = Some(Rc::new(consumer));
    }

    /// Remove the consumer; subsequent requests are dropped.
    pub fn unsubscribe(&self) {
        *self.consumer.borrow_mut() = None;
    }

    /// Dispatch a request to the consumer.
    ///
    /// The consumer handle is cloned out of the cell before the call, so
    /// a consumer may publish (supersede) from within its own handler.
    pub fn publish(&self, request: SelectionRequest) {
        let consumer = self.consumer.borrow().clone();
        match consumer {
            Some(consumer) => consumer(request),
            None => tracing::debug!("selection request dropped: no consumer installed"),
        }
    }
}

// === Selection highlight ===

/// blue-500, packed 0xRRGGBBAA.
const HIGHLIGHT_COLOR: u32 = 0x3B82F6FF;

/// Convert an RGBA u32 to a CSS rgba() string with a custom alpha.
fn rgba_u32_to_css_alpha(color: u32, alpha: f32) -> String {
    let r = (color >> 24) & 0xFF;
    let g = (color >> 16) & 0xFF;
    let b = (color >> 8) & 0xFF;
    format!("rgba({}, {}, {}, {})", r, g, b, alpha)
}

/// Visually mark an element as the current color-edit target.
///
/// The prior inline outline values are saved once (a re-mark of the same
/// element keeps the first recording) and overwritten with a dashed
/// highlight.
pub fn mark_selected(element: &Element) {
    let _ = element.set_attribute(markers::COLOR_EDITING, "true");

    if !element.has_attribute(markers::ORIGINAL_OUTLINE) {
        let _ = element.set_attribute(
            markers::ORIGINAL_OUTLINE,
            &style::inline_value(element, "outline"),
        );
        let _ = element.set_attribute(
            markers::ORIGINAL_OUTLINE_OFFSET,
            &style::inline_value(element, "outline-offset"),
        );
    }

    let outline = format!("2px dashed {}", rgba_u32_to_css_alpha(HIGHLIGHT_COLOR, 0.5));
    style::set_inline(element, "outline", &outline);
    style::set_inline(element, "outline-offset", "2px");
}

/// Remove the highlight, restoring the saved outline values exactly
/// (removal when nothing was originally set, not a default).
pub fn clear_selected(element: &Element) {
    let _ = element.remove_attribute(markers::COLOR_EDITING);

    if let Some(original) = element.get_attribute(markers::ORIGINAL_OUTLINE) {
        style::restore_inline(element, "outline", &original);
    }
    if let Some(original) = element.get_attribute(markers::ORIGINAL_OUTLINE_OFFSET) {
        style::restore_inline(element, "outline-offset", &original);
    }

    let _ = element.remove_attribute(markers::ORIGINAL_OUTLINE);
    let _ = element.remove_attribute(markers::ORIGINAL_OUTLINE_OFFSET);
    style::tidy_style_attr(element);
}
