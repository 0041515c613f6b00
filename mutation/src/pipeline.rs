//! The resource pipeline: list, create and update for any registered type.

use serde_json::Value as Json;
use warden_condition::{and, FilterConditionBuilder, PermissionConditionBuilder};
use warden_core::{
    capabilities, Caller, Capability, CapabilitySet, FilterSpec, MutationObject, RecordId, TypeId,
};
use warden_query::{Page, QueryExecutor};
use warden_registry::{Registry, TypeDef};
use warden_store::Store;

use crate::error::{MutationError, MutationResult};
use crate::normalize::{normalize_filter, normalize_object, SecretHasher};
use crate::ops;
use crate::result::{UpdateOutcome, UpdatePlan};
use crate::validation::validate_object;

/// Capabilities that make a row readable.
pub fn read_capabilities() -> CapabilitySet {
    capabilities([Capability::MANAGEMENT, Capability::SELF])
}

/// Capabilities that make a row writable.
pub fn write_capabilities() -> CapabilitySet {
    capabilities([Capability::MANAGEMENT])
}

/// Drives list, create and update for every resource type in a registry.
///
/// The pipeline holds no store. Each call receives the store it runs
/// against, so locking is the caller's concern.
pub struct ResourceMutationPipeline<'a> {
    registry: &'a Registry,
    hasher: &'a dyn SecretHasher,
}

impl<'a> ResourceMutationPipeline<'a> {
    pub fn new(registry: &'a Registry, hasher: &'a dyn SecretHasher) -> Self {
        Self { registry, hasher }
    }

    /// One page of the rows the caller can read that match `filter`.
    pub fn list(
        &self,
        store: &Store,
        type_id: TypeId,
        filter: FilterSpec,
        page: u64,
        limit: u64,
        caller: &Caller,
    ) -> MutationResult<Page<Json>> {
        let type_def = self.type_def(type_id)?;
        let filter = normalize_filter(type_def, filter)?;

        let predicate = and(
            FilterConditionBuilder::new(self.registry).build(type_id, &filter)?,
            PermissionConditionBuilder::new(self.registry).build(
                &read_capabilities(),
                type_id,
                caller,
            ),
        );

        Ok(QueryExecutor::new(self.registry, store).list(type_id, &predicate, page, limit)?)
    }

    /// Create a record from a complete mutation object.
    ///
    /// References are checked before the insert; a failed check writes nothing.
    pub fn create(
        &self,
        store: &mut Store,
        type_id: TypeId,
        object: MutationObject,
        caller: &Caller,
    ) -> MutationResult<RecordId> {
        let type_def = self.type_def(type_id)?;
        validate_object(self.registry, type_def, &object, true)?;
        let changes = normalize_object(type_def, object, self.hasher)?;

        ops::check_references(self.registry, store, type_def, &changes, caller)?;
        ops::execute_create(store, type_def, changes)
    }

    /// Validate, normalize and check an update, and select its target rows.
    pub fn plan_update(
        &self,
        store: &Store,
        type_id: TypeId,
        filter: FilterSpec,
        object: MutationObject,
        caller: &Caller,
    ) -> MutationResult<UpdatePlan> {
        let type_def = self.type_def(type_id)?;
        validate_object(self.registry, type_def, &object, false)?;
        let changes = normalize_object(type_def, object, self.hasher)?;
        let filter = normalize_filter(type_def, filter)?;

        ops::check_references(self.registry, store, type_def, &changes, caller)?;
        ops::plan_update(self.registry, store, type_def, &filter, changes, caller)
    }

    /// Write a planned update.
    pub fn apply_update(&self, store: &mut Store, plan: UpdatePlan) -> MutationResult<UpdateOutcome> {
        ops::apply_update(store, plan)
    }

    /// Plan and apply an update against the same store.
    pub fn update(
        &self,
        store: &mut Store,
        type_id: TypeId,
        filter: FilterSpec,
        object: MutationObject,
        caller: &Caller,
    ) -> MutationResult<UpdateOutcome> {
        let plan = self.plan_update(store, type_id, filter, object, caller)?;
        self.apply_update(store, plan)
    }

    fn type_def(&self, type_id: TypeId) -> MutationResult<&'a TypeDef> {
        self.registry
            .get_type(type_id)
            .ok_or_else(|| MutationError::unknown_type(type_id.to_string()))
    }
}
