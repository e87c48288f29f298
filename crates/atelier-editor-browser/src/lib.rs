//! Browser DOM layer for the atelier design editor.
//!
//! This crate turns injected design markup into an in-place editing
//! surface and back again. It assumes a `wasm32-unknown-unknown` target
//! environment.
//!
//! # Architecture
//!
//! - `editable`: instrument a container subtree for in-place editing and
//!   reverse it exactly on teardown
//! - `selection`: typed "pick a color for this element" channel between
//!   the content surface and whatever renders the picker
//! - `session`: the single editing session object (right-mouse tracking,
//!   active selection, host update notifications)
//! - `color_dom`: apply/read utility color classes on live elements,
//!   resolve right-click targets
//! - `export`: strip editing instrumentation and assemble the static
//!   export document
//!
//! # Re-exports
//!
//! This crate re-exports `atelier-editor-core` for convenience, so
//! consumers only need to depend on `atelier-editor-browser`.

// Re-export core crate
pub use atelier_editor_core;
pub use atelier_editor_core::*;

pub mod color_dom;
pub mod editable;
pub mod export;
pub mod selection;
pub mod session;

mod style;

pub use color_dom::{apply_color_class, find_target_element, get_current_colors, resolve_target};
pub use editable::{EditableContent, allows_native_menu};
pub use export::{
    clean_html_for_export, export_document, mark_design_containers, mark_design_containers_later,
};
pub use selection::{SelectionBus, SelectionRequest};
pub use session::{ColorUpdate, EditorSession, PickerOpen};
