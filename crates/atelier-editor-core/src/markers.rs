//! Instrumentation marker attributes.
//!
//! Everything the editing session writes onto elements is named here, in
//! one place, so the editable controller (which writes them), the
//! teardown path (which removes them) and the export cleaner (which
//! strips any that leak into a snapshot) agree on the exact set.

/// Boolean marker on each top-level rendered design root; scopes
/// container-level listeners when several designs coexist on one page.
pub const DESIGN_CONTAINER: &str = "data-design-container";

/// Set on the container while the document-level mouse tracking
/// listeners are attached.
pub const MOUSE_TRACKING: &str = "data-mouse-tracking-added";

/// Set on the container while its context-menu listener is attached.
pub const SELECTION_ENABLED: &str = "data-color-selection-enabled";

/// Original inline `pointer-events` value of a neutralized interactive
/// element (empty when none was set).
pub const ORIGINAL_POINTER_EVENTS: &str = "data-original-pointer-events";

/// Original text content of an editable interactive element.
pub const ORIGINAL_TEXT: &str = "data-original-text";

/// Original inline `cursor` value of an editable interactive element.
pub const ORIGINAL_CURSOR: &str = "data-original-cursor";

/// Marks elements carrying the right-click mousedown/focus guards.
pub const RIGHT_CLICK_GUARDS: &str = "data-right-click-handlers";

/// Marks the element currently under color-edit focus.
pub const COLOR_EDITING: &str = "data-color-editing";

/// Original inline `outline` of the selection-highlighted element.
pub const ORIGINAL_OUTLINE: &str = "data-original-outline";

/// Original inline `outline-offset` of the selection-highlighted element.
pub const ORIGINAL_OUTLINE_OFFSET: &str = "data-original-outline-offset";

/// Every attribute the export cleaner must strip. Exported HTML contains
/// none of these.
pub const INSTRUMENTATION_ATTRS: [&str; 10] = [
    DESIGN_CONTAINER,
    MOUSE_TRACKING,
    SELECTION_ENABLED,
    ORIGINAL_POINTER_EVENTS,
    ORIGINAL_TEXT,
    ORIGINAL_CURSOR,
    RIGHT_CLICK_GUARDS,
    COLOR_EDITING,
    ORIGINAL_OUTLINE,
    ORIGINAL_OUTLINE_OFFSET,
];

/// Inline style properties the editing session may inject; stripped on
/// export alongside the marker attributes.
pub const INSTRUMENTATION_STYLES: [&str; 4] = ["pointer-events", "cursor", "outline", "outline-offset"];
