//! Predicate composition.

use crate::{ConditionResult, Evaluator};
use warden_core::{Predicate, Record, RecordId, TypeId};
use warden_registry::Registry;
use warden_store::Store;

/// Logical conjunction. `True` is absorbed and `False` wins.
pub fn and(left: Predicate, right: Predicate) -> Predicate {
    and_all([left, right])
}

/// Logical disjunction. `False` is absorbed and `True` wins.
pub fn or(left: Predicate, right: Predicate) -> Predicate {
    or_all([left, right])
}

/// Conjoin any number of predicates. The empty conjunction is `True`.
pub fn and_all(items: impl IntoIterator<Item = Predicate>) -> Predicate {
    let mut parts = Vec::new();
    for item in items {
        match item {
            Predicate::True => {}
            Predicate::False => return Predicate::False,
            Predicate::And(nested) => parts.extend(nested),
            other => parts.push(other),
        }
    }
    match parts.len() {
        0 => Predicate::True,
        1 => parts.remove(0),
        _ => Predicate::And(parts),
    }
}

/// Disjoin any number of predicates. The empty disjunction is `False`.
pub fn or_all(items: impl IntoIterator<Item = Predicate>) -> Predicate {
    let mut parts = Vec::new();
    for item in items {
        match item {
            Predicate::False => {}
            Predicate::True => return Predicate::True,
            Predicate::Or(nested) => parts.extend(nested),
            other => parts.push(other),
        }
    }
    match parts.len() {
        0 => Predicate::False,
        1 => parts.remove(0),
        _ => Predicate::Or(parts),
    }
}

/// Combines predicates and runs them against one store.
///
/// Query execution and single-record checks go through the same evaluator,
/// so a record satisfies a predicate exactly when querying its type with
/// that predicate returns it.
pub struct ConditionComposer<'a> {
    evaluator: Evaluator<'a>,
}

impl<'a> ConditionComposer<'a> {
    pub fn new(registry: &'a Registry, store: &'a Store) -> Self {
        Self {
            evaluator: Evaluator::new(registry, store),
        }
    }

    /// Conjoin two predicates.
    pub fn and(left: Predicate, right: Predicate) -> Predicate {
        and(left, right)
    }

    /// Check one already-loaded record against a predicate.
    pub fn satisfies(&self, record: &Record, predicate: &Predicate) -> ConditionResult<bool> {
        self.evaluator.matches(record, predicate)
    }

    /// Ids of all rows of a type matching a predicate, in creation order.
    pub fn select(&self, type_id: TypeId, predicate: &Predicate) -> ConditionResult<Vec<RecordId>> {
        self.evaluator.select(type_id, predicate)
    }

    /// Number of rows of a type matching a predicate.
    pub fn count(&self, type_id: TypeId, predicate: &Predicate) -> ConditionResult<usize> {
        Ok(self.evaluator.select(type_id, predicate)?.len())
    }
}
