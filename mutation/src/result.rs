//! Mutation result types.

use warden_core::{Fields, RecordId, TypeId};

/// The rows an update will touch and the values it will write, computed
/// under a read lock and applied later under a write lock.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePlan {
    /// Type being updated.
    pub type_id: TypeId,
    /// Rows selected by the writable predicate, in creation order.
    pub targets: Vec<RecordId>,
    /// Normalized field values to write on every target.
    pub changes: Fields,
}

/// Outcome of an applied update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Rows written.
    pub updated: Vec<RecordId>,
}

impl UpdateOutcome {
    /// Number of rows written.
    pub fn count(&self) -> usize {
        self.updated.len()
    }
}
