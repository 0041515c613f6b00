//! Record creation.

use warden_core::{Fields, RecordId};
use warden_registry::TypeDef;
use warden_store::Store;

use crate::error::MutationResult;

/// Insert a record with the normalized fields, filling declared defaults.
pub(crate) fn execute_create(
    store: &mut Store,
    type_def: &TypeDef,
    mut changes: Fields,
) -> MutationResult<RecordId> {
    for field in &type_def.fields {
        if let Some(default) = &field.default {
            changes
                .entry(field.name.clone())
                .or_insert_with(|| default.clone());
        }
    }

    let id = store.create_record(type_def.id, changes)?;
    tracing::info!(type_name = %type_def.name, %id, "created record");
    Ok(id)
}
