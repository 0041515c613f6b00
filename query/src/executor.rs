//! Query execution.

use crate::{paginate, Page, Projector, QueryError, QueryResult};
use serde_json::Value as Json;
use warden_condition::Evaluator;
use warden_core::{Predicate, Record, TypeId};
use warden_registry::Registry;
use warden_store::Store;

/// Runs a composed predicate and pages the projected result.
pub struct QueryExecutor<'a> {
    registry: &'a Registry,
    store: &'a Store,
    evaluator: Evaluator<'a>,
}

impl<'a> QueryExecutor<'a> {
    /// Create a new executor.
    pub fn new(registry: &'a Registry, store: &'a Store) -> Self {
        Self {
            registry,
            store,
            evaluator: Evaluator::new(registry, store),
        }
    }

    /// Records of a type matching a predicate, in creation order.
    pub fn select(&self, type_id: TypeId, predicate: &Predicate) -> QueryResult<Vec<&'a Record>> {
        let ids = self.evaluator.select(type_id, predicate)?;
        Ok(ids.into_iter().filter_map(|id| self.store.get(id)).collect())
    }

    /// One page of projected records matching a predicate.
    pub fn list(
        &self,
        type_id: TypeId,
        predicate: &Predicate,
        page: u64,
        limit: u64,
    ) -> QueryResult<Page<Json>> {
        let type_def = self
            .registry
            .get_type(type_id)
            .ok_or_else(|| QueryError::unknown_type(type_id.to_string()))?;

        let records = self.select(type_id, predicate)?;
        tracing::debug!(
            type_name = %type_def.name,
            matched = records.len(),
            page,
            limit,
            "listing records"
        );

        let projector = Projector::new(self.registry, self.store);
        paginate(&records, page, limit, |record| projector.project(record))
    }
}
