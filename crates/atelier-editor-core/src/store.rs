//! Collaborator contracts.
//!
//! The editor core does not persist anything or decide placement; these
//! traits pin the shapes it consumes. Implementations (a remote document
//! store, the layout sidebar) live with the host application.

use crate::design::{Design, Slot, SlotAssignments};

/// Failure from a persistence backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend rejected or failed the operation.
    #[error("store backend error: {0}")]
    Backend(String),

    /// A stored record did not match the expected shape.
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

/// Persistence collaborator: called only at explicit save points and on
/// initial mount.
#[allow(async_fn_in_trait)]
pub trait DesignStore {
    /// Load the user's slot assignments; an empty mapping when the user
    /// has never saved.
    async fn load_designs(&self, user_id: &str) -> Result<SlotAssignments, StoreError>;

    /// Persist the user's slot assignments.
    async fn save_designs(
        &self,
        user_id: &str,
        designs: &SlotAssignments,
    ) -> Result<(), StoreError>;
}

/// Layout collaborator: supplies the ordered list of active slots and the
/// design currently assigned to each. The editor only edits and exports
/// whatever is assigned.
pub trait LayoutProvider {
    /// Active slots in display order.
    fn active_slots(&self) -> Vec<Slot>;

    /// The design assigned to a slot, if any.
    fn assigned_design(&self, slot_name: &str) -> Option<Design>;
}
