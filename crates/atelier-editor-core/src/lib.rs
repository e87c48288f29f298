//! atelier-editor-core: framework-free logic for the atelier design editor.
//!
//! This crate holds everything that does not need a live DOM, so it builds
//! and tests on native targets:
//!
//! - `color`: utility color classes (descriptor ⇄ class-name translation)
//! - `classes`: pure class-list rewrite planning and color scanning
//! - `markers`: instrumentation attribute names shared by the editable
//!   controller and the export cleaner
//! - `design`: design/slot records exchanged with the persistence layer
//! - `export`: static document assembly (section wrapping, document shell)
//! - `store`: collaborator contracts (persistence, layout)
//!
//! The DOM class list is the single source of truth for element color
//! state; this crate only computes what to read from it and what to write
//! back, so the matching logic stays unit-testable in isolation.

pub mod classes;
pub mod color;
pub mod design;
pub mod export;
pub mod markers;
pub mod store;

pub use classes::{ClassUpdate, ElementColorState, plan_color_update, scan_colors};
pub use color::{
    COLOR_FAMILIES, ColorChoice, ColorDescriptor, ColorRole, OPACITY_STEPS, SHADES,
    is_color_class, preview_swatch,
};
pub use design::{CanvasState, Design, Slot, SlotAssignments};
pub use export::{document_shell, slug, wrap_section};
pub use smol_str::SmolStr;
pub use store::{DesignStore, LayoutProvider, StoreError};
