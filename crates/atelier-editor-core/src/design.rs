//! Design and slot records exchanged with the persistence and layout
//! collaborators.
//!
//! Wire casing (`docId`, `userId`) follows the stored document shape, so
//! records round-trip byte-compatible with existing data.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named unit of raw HTML content assignable to a slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Design {
    pub id: i64,
    /// Backend document ID, when the record has been persisted.
    #[serde(rename = "docId", default, skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<String>,
    pub name: String,
    pub active: bool,
    pub html: String,
}

/// A named placement region in the overall layout (e.g. "Hero") that may
/// hold zero or one design.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: i64,
    pub name: String,
    pub active: bool,
    pub order: u32,
    #[serde(rename = "docId", default, skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<String>,
}

/// Per-slot design assignment, keyed by slot name. A `None` value means
/// the slot is present but empty.
pub type SlotAssignments = BTreeMap<String, Option<Design>>;

/// One user's persisted canvas: their slot assignments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasState {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub sections: SlotAssignments,
}
