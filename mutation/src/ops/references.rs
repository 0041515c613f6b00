//! Foreign-key checks.

use warden_condition::{ConditionComposer, PermissionConditionBuilder};
use warden_core::{Caller, Fields};
use warden_registry::{Registry, TypeDef};
use warden_store::Store;

use crate::error::{MutationError, MutationResult};
use crate::pipeline::write_capabilities;

/// Every non-null reference in `changes` must exist and be writable by the caller.
///
/// Runs before any write, so a failing check leaves the store untouched.
pub(crate) fn check_references(
    registry: &Registry,
    store: &Store,
    type_def: &TypeDef,
    changes: &Fields,
    caller: &Caller,
) -> MutationResult<()> {
    let composer = ConditionComposer::new(registry, store);
    let permissions = PermissionConditionBuilder::new(registry);
    let write_set = write_capabilities();

    for field in type_def.reference_fields() {
        let Some(value) = changes.get(&field.name) else {
            continue;
        };
        let Some(id) = value.as_record() else {
            continue;
        };
        let Some(target_name) = field.kind.ref_target() else {
            continue;
        };
        let target = registry
            .get_type_by_name(target_name)
            .ok_or_else(|| MutationError::unknown_type(target_name))?;

        let record = store
            .get_of_type(target.id, id)
            .map_err(|_| MutationError::not_found(&target.name))?;

        let allowed = permissions.build(&write_set, target.id, caller);
        if !composer.satisfies(record, &allowed)? {
            tracing::debug!(
                field = %field.name,
                target = %target.name,
                %id,
                "reference not writable by caller"
            );
            return Err(MutationError::permission_denied(&target.name));
        }
    }
    Ok(())
}
