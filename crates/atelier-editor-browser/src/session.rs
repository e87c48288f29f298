//! The editing session: one explicitly-constructed object owning every
//! piece of cross-component state.
//!
//! A session holds the right-mouse-button flag (shared with the editable
//! controller's document-level tracking), the selection bus, the active
//! selection context and the host's update hook. Only one element can be
//! under color-edit focus at a time across the whole application; a new
//! selection cleanly supersedes the previous one. All mutation happens on
//! the single UI thread, so interior mutability stands in for locking.

use atelier_editor_core::{ColorChoice, ColorRole, ElementColorState, markers};
use gloo_timers::callback::Timeout;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::color_dom::{apply_color_class, find_target_element, get_current_colors};
use crate::selection::{SelectionBus, SelectionRequest, clear_selected, mark_selected};

/// Delay between a color application and the host update notification,
/// letting synchronous DOM mutation from the triggering event finish
/// before the host re-reads the container markup.
pub const COLOR_UPDATE_SETTLE_MS: u32 = 50;

/// "Re-read this container" notification payload.
#[derive(Clone)]
pub struct ColorUpdate {
    pub element: Element,
    pub container: Element,
}

/// Picker-open signal produced when a selection request resolves.
#[derive(Clone)]
pub struct PickerOpen {
    pub x: i32,
    pub y: i32,
    pub preferred_role: Option<ColorRole>,
}

/// The element currently under color-edit focus. The session does not
/// own the element's lifetime; the container DOM does.
struct SelectionContext {
    element: Element,
    container: Element,
    colors: ElementColorState,
}

/// Process-wide editing session state. Construct once at the application
/// root and pass the `Rc` to every component that needs it.
pub struct EditorSession {
    right_mouse_down: Cell<bool>,
    selection: RefCell<Option<SelectionContext>>,
    bus: SelectionBus,
    on_update: RefCell<Option<Rc<dyn Fn(ColorUpdate)>>>,
    pending_notify: RefCell<Option<Timeout>>,
}

impl EditorSession {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            right_mouse_down: Cell::new(false),
            selection: RefCell::new(None),
            bus: SelectionBus::new(),
            on_update: RefCell::new(None),
            pending_notify: RefCell::new(None),
        })
    }

    /// The selection request channel shared with producers.
    pub fn bus(&self) -> SelectionBus {
        self.bus.clone()
    }

    /// Whether the right mouse button is currently held, per the
    /// document-level tracking listeners.
    pub fn right_mouse_down(&self) -> bool {
        self.right_mouse_down.get()
    }

    pub(crate) fn set_right_mouse_down(&self, down: bool) {
        self.right_mouse_down.set(down);
    }

    /// Install the host hook that receives debounced update
    /// notifications so it can re-read and persist container markup.
    pub fn on_update(&self, hook: impl Fn(ColorUpdate) + 'static) {
        *self.on_update.borrow_mut() = Some(Rc::new(hook));
    }

    /// Install the single selection-request consumer: resolves the final
    /// target (direct reference, else point lookup), records it as the
    /// active selection and signals a picker-open transition.
    ///
    /// Holds only a weak session reference, so the bus never keeps the
    /// session alive.
    pub fn install_consumer(self: &Rc<Self>, on_open: impl Fn(PickerOpen) + 'static) {
        let weak: Weak<EditorSession> = Rc::downgrade(self);
        self.bus.subscribe(move |request: SelectionRequest| {
            let Some(session) = weak.upgrade() else {
                return;
            };
            let resolved = request
                .target
                .clone()
                .or_else(|| find_target_element(&request.container, request.x, request.y));
            let Some(element) = resolved else {
                tracing::debug!("selection request resolved to no colorable target");
                return;
            };
            session.select_in_container(&element, request.container.clone());
            on_open(PickerOpen {
                x: request.x,
                y: request.y,
                preferred_role: request.preferred_role,
            });
        });
    }

    /// Directly select an element (used by toolbar controls that already
    /// hold a reference). The enclosing container is the nearest design
    /// container ancestor, defaulting to the document body.
    pub fn select_element(&self, element: &Element) {
        let container = element
            .closest(&format!("[{}]", markers::DESIGN_CONTAINER))
            .ok()
            .flatten()
            .unwrap_or_else(|| gloo_utils::body().into());
        self.select_in_container(element, container);
    }

    /// Select an element within a known container, superseding any
    /// previous selection (its highlight is removed first).
    pub fn select_in_container(&self, element: &Element, container: Element) {
        let mut selection = self.selection.borrow_mut();
        if let Some(previous) = selection.take() {
            if previous.element != *element {
                clear_selected(&previous.element);
            }
        }
        mark_selected(element);
        *selection = Some(SelectionContext {
            element: element.clone(),
            container,
            colors: get_current_colors(element),
        });
    }

    /// The element currently under color-edit focus, if any.
    pub fn current_element(&self) -> Option<Element> {
        self.selection.borrow().as_ref().map(|s| s.element.clone())
    }

    /// Snapshot of the current selection's resolved colors.
    pub fn current_colors(&self) -> ElementColorState {
        self.selection
            .borrow()
            .as_ref()
            .map(|s| s.colors.clone())
            .unwrap_or_default()
    }

    /// Apply a color choice to the current selection.
    ///
    /// With no active selection this is a caller bug, not a user-facing
    /// error: logged and ignored. The cached color snapshot is refreshed
    /// from the DOM, focus returns to the element if it is editable text
    /// (so typing can continue), and a debounced update notification is
    /// scheduled for the host.
    pub fn update_color(&self, choice: &ColorChoice, role: ColorRole) {
        let mut selection = self.selection.borrow_mut();
        let Some(context) = selection.as_mut() else {
            tracing::warn!(role = role.prefix(), "color update with no active selection");
            return;
        };

        apply_color_class(&context.element, choice, role);
        context.colors = get_current_colors(&context.element);

        if context.element.has_attribute("contenteditable") {
            if let Some(editable) = context.element.dyn_ref::<web_sys::HtmlElement>() {
                let _ = editable.focus();
            }
        }

        let update = ColorUpdate {
            element: context.element.clone(),
            container: context.container.clone(),
        };
        drop(selection);
        self.schedule_notify(update);
    }

    /// Close the picker: fire one final update notification, then
    /// restore the selection highlight and clear the context. The final
    /// notification fires even when no color changed.
    pub fn close_picker(&self) {
        let context = self.selection.borrow_mut().take();
        if let Some(context) = context {
            self.notify_now(ColorUpdate {
                element: context.element.clone(),
                container: context.container,
            });
            clear_selected(&context.element);
        }
    }

    /// Schedule a debounced notification; a newer update supersedes a
    /// pending one by cancelling its timeout.
    fn schedule_notify(&self, update: ColorUpdate) {
        let Some(hook) = self.on_update.borrow().clone() else {
            tracing::trace!("no update hook installed, skipping notification");
            return;
        };
        let timeout = Timeout::new(COLOR_UPDATE_SETTLE_MS, move || {
            // The element may have been unmounted while the timeout was
            // pending.
            if !update.element.is_connected() {
                tracing::debug!("dropping update notification for disconnected element");
                return;
            }
            hook(update);
        });
        *self.pending_notify.borrow_mut() = Some(timeout);
    }

    fn notify_now(&self, update: ColorUpdate) {
        self.pending_notify.borrow_mut().take();
        let hook = self.on_update.borrow().clone();
        if let Some(hook) = hook {
            hook(update);
        }
    }
}
