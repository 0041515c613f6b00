//! Bulk update: plan against the readable and writable sets, then apply.

use warden_condition::{and, ConditionComposer, FilterConditionBuilder, PermissionConditionBuilder};
use warden_core::{Caller, Fields, FilterSpec};
use warden_registry::{Registry, TypeDef};
use warden_store::Store;

use crate::error::{MutationError, MutationResult};
use crate::pipeline::{read_capabilities, write_capabilities};
use crate::result::{UpdateOutcome, UpdatePlan};

/// Select the rows an update will write.
///
/// An empty readable set is NotFound whether the rows are missing or merely
/// invisible. A non-empty readable set with an empty writable set is
/// PermissionDenied. Every writable row is targeted, so an unselective
/// filter produces a bulk update.
pub(crate) fn plan_update(
    registry: &Registry,
    store: &Store,
    type_def: &TypeDef,
    filter: &FilterSpec,
    changes: Fields,
    caller: &Caller,
) -> MutationResult<UpdatePlan> {
    let composer = ConditionComposer::new(registry, store);
    let permissions = PermissionConditionBuilder::new(registry);
    let selected = FilterConditionBuilder::new(registry).build(type_def.id, filter)?;

    let readable = and(
        selected.clone(),
        permissions.build(&read_capabilities(), type_def.id, caller),
    );
    let readable_count = composer.count(type_def.id, &readable)?;
    if readable_count < 1 {
        return Err(MutationError::not_found(&type_def.name));
    }

    let writable = and(
        selected,
        permissions.build(&write_capabilities(), type_def.id, caller),
    );
    let targets = composer.select(type_def.id, &writable)?;
    if targets.is_empty() {
        return Err(MutationError::permission_denied(&type_def.name));
    }

    tracing::debug!(
        type_name = %type_def.name,
        readable = readable_count,
        writable = targets.len(),
        "planned update"
    );
    if targets.len() > 1 {
        tracing::warn!(
            type_name = %type_def.name,
            rows = targets.len(),
            "update filter selects more than one row"
        );
    }

    Ok(UpdatePlan {
        type_id: type_def.id,
        targets,
        changes,
    })
}

/// Write the planned changes to every target row.
///
/// Each field write is atomic on its own; the plan is not re-checked, so
/// writes made between planning and applying are overwritten.
pub(crate) fn apply_update(store: &mut Store, plan: UpdatePlan) -> MutationResult<UpdateOutcome> {
    let mut outcome = UpdateOutcome::default();
    for id in plan.targets {
        for (name, value) in &plan.changes {
            store.set_field(id, name, value.clone())?;
        }
        outcome.updated.push(id);
    }
    tracing::info!(updated = outcome.count(), "applied update");
    Ok(outcome)
}
