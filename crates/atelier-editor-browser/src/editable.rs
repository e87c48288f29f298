//! The editable-content controller: turn a static design subtree into an
//! in-place editor surface, and reverse that transformation exactly.
//!
//! Per container the state machine is `Uninstrumented → Instrumented →
//! Uninstrumented`. Instrumenting an already-instrumented container is
//! the idempotent refresh path (used after structural content changes,
//! e.g. closing a full-screen preview): marker attributes gate
//! per-element work so nothing gets double-applied and no listener is
//! attached twice.
//!
//! Listener bookkeeping is an explicit registry owned by the controller:
//! every attached listener is a RAII [`EventListener`] held in a
//! per-element bag, so teardown (and `Drop`) detaches them even for
//! elements that have since left the DOM.

use atelier_editor_core::markers;
use gloo_events::{EventListener, EventListenerOptions, EventListenerPhase};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Element, MouseEvent, Node, NodeList};

use crate::selection::SelectionRequest;
use crate::session::EditorSession;
use crate::style;

const INTERACTIVE_SELECTOR: &str = "button, input, select, textarea, a";
const TEXT_SELECTOR: &str = "h1, h2, h3, h4, h5, h6, p, span, div";

/// Capture-phase, non-passive: guards must run before native focus
/// handling and be able to cancel it.
fn capture_active() -> EventListenerOptions {
    EventListenerOptions {
        phase: EventListenerPhase::Capture,
        passive: false,
    }
}

/// The right-click guard listeners attached to one editable element.
struct ElementGuards {
    element: Element,
    _mousedown: EventListener,
    _focus: EventListener,
}

/// Controller instrumenting one design container for in-place editing.
pub struct EditableContent {
    container: Element,
    session: Rc<EditorSession>,
    /// Document-level capture listeners tracking the right mouse button.
    mouse_tracking: Vec<EventListener>,
    /// Per-element right-click guard registry.
    guards: Vec<ElementGuards>,
    /// Container-level context-menu listener.
    context_menu: Option<EventListener>,
}

impl EditableContent {
    pub fn new(container: Element, session: Rc<EditorSession>) -> Self {
        Self {
            container,
            session,
            mouse_tracking: Vec::new(),
            guards: Vec::new(),
            context_menu: None,
        }
    }

    pub fn container(&self) -> &Element {
        &self.container
    }

    /// Whether the container is currently instrumented.
    pub fn is_instrumented(&self) -> bool {
        !self.mouse_tracking.is_empty()
    }

    /// Number of elements currently carrying right-click guards.
    pub fn guard_count(&self) -> usize {
        self.guards.len()
    }

    /// Instrument the container subtree: track the right mouse button at
    /// the document level, neutralize interactive descendants, make
    /// text-bearing descendants editable, and route container
    /// right-clicks into the selection protocol.
    ///
    /// Idempotent: safe to call on an already-instrumented container.
    pub fn instrument(&mut self) {
        self.attach_mouse_tracking();
        self.instrument_interactive();
        self.instrument_text();
        self.attach_context_menu();
        tracing::debug!(guards = self.guards.len(), "container instrumented");
    }

    /// Re-run instrumentation over the current content. Used after
    /// structural changes re-rendered parts of the subtree; already
    /// instrumented elements are left untouched.
    pub fn refresh(&mut self) {
        self.instrument();
    }

    // === Apply ===

    /// Contenteditable elements natively steal focus on any mouse button
    /// including the right one. Focus events do not carry the triggering
    /// button, so the button state is observed globally, in the capture
    /// phase, at the document level.
    fn attach_mouse_tracking(&mut self) {
        if !self.mouse_tracking.is_empty() {
            return;
        }
        let document = gloo_utils::document();

        let session = self.session.clone();
        self.mouse_tracking.push(EventListener::new_with_options(
            &document,
            "mousedown",
            EventListenerOptions::run_in_capture_phase(),
            move |event| {
                let is_right = event
                    .dyn_ref::<MouseEvent>()
                    .is_some_and(|mouse| mouse.button() == 2);
                session.set_right_mouse_down(is_right);
            },
        ));

        let session = self.session.clone();
        self.mouse_tracking.push(EventListener::new_with_options(
            &document,
            "mouseup",
            EventListenerOptions::run_in_capture_phase(),
            move |_| session.set_right_mouse_down(false),
        ));

        let session = self.session.clone();
        self.mouse_tracking.push(EventListener::new_with_options(
            &document,
            "contextmenu",
            EventListenerOptions::run_in_capture_phase(),
            move |_| session.set_right_mouse_down(false),
        ));

        let _ = self.container.set_attribute(markers::MOUSE_TRACKING, "true");
    }

    /// Neutralize native interactivity of buttons, inputs, selects,
    /// textareas and anchors while keeping their text editable.
    fn instrument_interactive(&mut self) {
        for element in query(&self.container, INTERACTIVE_SELECTOR) {
            if !element.has_attribute(markers::ORIGINAL_POINTER_EVENTS) {
                let original = style::inline_value(&element, "pointer-events");
                let _ = element.set_attribute(markers::ORIGINAL_POINTER_EVENTS, &original);
                style::set_inline(&element, "pointer-events", "none");
            }

            if !has_text(&element) {
                continue;
            }

            if !element.has_attribute(markers::ORIGINAL_TEXT) {
                let text = element.text_content().unwrap_or_default();
                let _ = element.set_attribute(markers::ORIGINAL_TEXT, &text);
                let _ = element.set_attribute(
                    markers::ORIGINAL_CURSOR,
                    &style::inline_value(&element, "cursor"),
                );
                style::set_inline(&element, "cursor", "text");
            }

            self.make_editable(&element);
        }
    }

    /// Make headings, paragraphs, spans and leaf divs with text directly
    /// editable.
    fn instrument_text(&mut self) {
        for element in query(&self.container, TEXT_SELECTOR) {
            // Only leaf divs: a div with element children is structure,
            // not a text run.
            if element.tag_name() == "DIV" && element.child_element_count() != 0 {
                continue;
            }
            if element
                .closest("input, select, textarea")
                .ok()
                .flatten()
                .is_some()
            {
                continue;
            }
            if !has_text(&element) {
                continue;
            }
            self.make_editable(&element);
        }
    }

    /// Mark an element contenteditable and attach the right-click
    /// guards, unless it is already guarded.
    fn make_editable(&mut self, element: &Element) {
        let _ = element.set_attribute("contenteditable", "true");

        if element.has_attribute(markers::RIGHT_CLICK_GUARDS) {
            return;
        }

        let mousedown = EventListener::new_with_options(
            element.as_ref(),
            "mousedown",
            capture_active(),
            |event| {
                if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                    if mouse.button() == 2 {
                        event.prevent_default();
                        event.stop_propagation();
                    }
                }
            },
        );

        let session = self.session.clone();
        let focus = EventListener::new_with_options(
            element.as_ref(),
            "focus",
            capture_active(),
            move |event| {
                if !session.right_mouse_down() {
                    return;
                }
                event.prevent_default();
                event.stop_propagation();
                if let Some(target) = event
                    .target()
                    .and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok())
                {
                    let _ = target.blur();
                }
                // Redirect focus somewhere safe.
                let _ = gloo_utils::body().focus();
            },
        );

        let _ = element.set_attribute(markers::RIGHT_CLICK_GUARDS, "true");
        self.guards.push(ElementGuards {
            element: element.clone(),
            _mousedown: mousedown,
            _focus: focus,
        });
    }

    /// Route container right-clicks into the selection protocol, except
    /// while the user is mid-edit in the clicked element (the native
    /// menu stays available for copy/paste there).
    fn attach_context_menu(&mut self) {
        if self.context_menu.is_some() {
            return;
        }

        let session = self.session.clone();
        let container = self.container.clone();
        let listener = EventListener::new_with_options(
            self.container.as_ref(),
            "contextmenu",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok())
                else {
                    return;
                };
                if allows_native_menu(&target) {
                    return;
                }
                event.prevent_default();
                session.bus().publish(SelectionRequest {
                    container: container.clone(),
                    x: mouse.client_x(),
                    y: mouse.client_y(),
                    target: None,
                    preferred_role: None,
                });
            },
        );

        let _ = self
            .container
            .set_attribute(markers::SELECTION_ENABLED, "true");
        self.context_menu = Some(listener);
    }

    // === Reverse ===

    /// Remove every piece of instrumentation, restoring the subtree to
    /// its pre-instrumentation state.
    ///
    /// Tolerates being called when `instrument` never ran, and elements
    /// removed from the DOM since apply: dropping the registry detaches
    /// their listeners regardless, and attribute restoration only
    /// touches elements still present.
    pub fn teardown(&mut self) {
        self.mouse_tracking.clear();
        self.guards.clear();
        self.context_menu = None;

        let _ = self.container.remove_attribute(markers::MOUSE_TRACKING);
        let _ = self.container.remove_attribute(markers::SELECTION_ENABLED);

        for element in query(&self.container, "[contenteditable]") {
            let _ = element.remove_attribute("contenteditable");
            let _ = element.remove_attribute(markers::RIGHT_CLICK_GUARDS);
        }

        let selector = format!("[{}]", markers::ORIGINAL_POINTER_EVENTS);
        for element in query(&self.container, &selector) {
            let original = element
                .get_attribute(markers::ORIGINAL_POINTER_EVENTS)
                .unwrap_or_default();
            style::restore_inline(&element, "pointer-events", &original);

            if let Some(cursor) = element.get_attribute(markers::ORIGINAL_CURSOR) {
                style::restore_inline(&element, "cursor", &cursor);
            }

            let _ = element.remove_attribute(markers::ORIGINAL_POINTER_EVENTS);
            let _ = element.remove_attribute(markers::ORIGINAL_TEXT);
            let _ = element.remove_attribute(markers::ORIGINAL_CURSOR);
            style::tidy_style_attr(&element);
        }

        tracing::debug!("container instrumentation removed");
    }
}

impl Drop for EditableContent {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Whether the clicked element may keep the native context menu: it (or
/// its enclosing contenteditable) is the currently focused element, so
/// the user is mid-edit and may want copy/paste.
pub fn allows_native_menu(target: &Element) -> bool {
    let Some(active) = gloo_utils::document().active_element() else {
        return false;
    };
    if *target == active {
        return true;
    }
    matches!(
        target.closest("[contenteditable=\"true\"]"),
        Ok(Some(editable)) if editable == active
    )
}

fn has_text(element: &Element) -> bool {
    element
        .text_content()
        .is_some_and(|text| !text.trim().is_empty())
}

/// Query helper yielding elements instead of raw nodes.
fn query(root: &Element, selector: &str) -> Vec<Element> {
    let Ok(nodes) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    node_list_elements(&nodes)
}

fn node_list_elements(nodes: &NodeList) -> Vec<Element> {
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node: Node| node.dyn_into::<Element>().ok())
        .collect()
}
