//! Capability set to predicate.

use crate::or_all;
use warden_core::{Caller, CapabilitySet, Predicate, TypeId};
use warden_registry::Registry;

/// Builds the row-visibility predicate for a requested capability set.
pub struct PermissionConditionBuilder<'r> {
    registry: &'r Registry,
}

impl<'r> PermissionConditionBuilder<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// OR of the rules for every requested capability the caller holds.
    ///
    /// Holding none of them, or holding only capabilities with no rule on
    /// this type, yields `False`.
    pub fn build(&self, allowed: &CapabilitySet, type_id: TypeId, caller: &Caller) -> Predicate {
        let predicate = or_all(
            caller
                .held_among(allowed)
                .filter_map(|capability| self.registry.get_rule(type_id, capability))
                .map(|rule| rule.select(caller)),
        );
        tracing::trace!(%type_id, %predicate, "built permission condition");
        predicate
    }
}
