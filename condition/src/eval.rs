//! Predicate evaluation.

use crate::{or_all, ConditionError, ConditionResult};
use warden_core::{Predicate, Record, RecordId, Subquery, TypeId, Value, ID_FIELD};
use warden_registry::Registry;
use warden_store::Store;

/// Predicate evaluator.
///
/// Subqueries are resolved against the store first, turning every `In` into
/// a disjunction of equalities. The resolved predicate is then checked row by
/// row, both when querying a type and when checking a single record.
pub struct Evaluator<'a> {
    registry: &'a Registry,
    store: &'a Store,
}

impl<'a> Evaluator<'a> {
    /// Create a new evaluator.
    pub fn new(registry: &'a Registry, store: &'a Store) -> Self {
        Self { registry, store }
    }

    /// Check whether one loaded record matches a predicate.
    pub fn matches(&self, record: &Record, predicate: &Predicate) -> ConditionResult<bool> {
        let resolved = self.resolve(predicate)?;
        Ok(test(record, &resolved))
    }

    /// Ids of all rows of a type matching a predicate, in creation order.
    pub fn select(&self, type_id: TypeId, predicate: &Predicate) -> ConditionResult<Vec<RecordId>> {
        let resolved = self.resolve(predicate)?;
        if resolved.is_false() {
            return Ok(Vec::new());
        }

        let mut ids: Vec<RecordId> = match seed_ids(&resolved) {
            Some(candidates) => candidates
                .into_iter()
                .filter(|id| {
                    self.store
                        .get_of_type(type_id, *id)
                        .map(|record| test(record, &resolved))
                        .unwrap_or(false)
                })
                .collect(),
            None => match indexed_equality(&resolved) {
                Some((field, value)) => self
                    .store
                    .ids_by_field(type_id, field, value)
                    .filter(|id| {
                        self.store
                            .get(*id)
                            .map(|record| test(record, &resolved))
                            .unwrap_or(false)
                    })
                    .collect(),
                None => self
                    .store
                    .records_by_type(type_id)
                    .filter(|record| test(record, &resolved))
                    .map(|record| record.id)
                    .collect(),
            },
        };

        ids.sort_unstable();
        ids.dedup();
        Ok(ids)
    }

    /// Replace every subquery with the values it currently projects.
    fn resolve(&self, predicate: &Predicate) -> ConditionResult<Predicate> {
        Ok(match predicate {
            Predicate::In { field, source } => {
                let values = self.project(source)?;
                or_all(
                    values
                        .into_iter()
                        .map(|value| Predicate::eq(field.clone(), value)),
                )
            }
            Predicate::And(items) => Predicate::And(
                items
                    .iter()
                    .map(|item| self.resolve(item))
                    .collect::<ConditionResult<_>>()?,
            ),
            Predicate::Or(items) => Predicate::Or(
                items
                    .iter()
                    .map(|item| self.resolve(item))
                    .collect::<ConditionResult<_>>()?,
            ),
            other => other.clone(),
        })
    }

    /// Distinct non-null values of `column` over the rows a subquery selects.
    fn project(&self, source: &Subquery) -> ConditionResult<Vec<Value>> {
        let type_id = self
            .registry
            .get_type_id(&source.type_name)
            .ok_or_else(|| ConditionError::unknown_type(&source.type_name))?;

        let mut values: Vec<Value> = Vec::new();
        for id in self.select(type_id, &source.predicate)? {
            let Some(record) = self.store.get(id) else {
                continue;
            };
            let value = record.value(&source.column);
            if !value.is_null() && !values.contains(&value) {
                values.push(value);
            }
        }
        Ok(values)
    }
}

/// Check a resolved predicate against one record.
fn test(record: &Record, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::True => true,
        Predicate::False => false,
        Predicate::Eq { field, value } => record.value(field) == *value,
        Predicate::Contains { field, fragment } => record
            .value(field)
            .as_str()
            .map(|s| s.contains(fragment.as_str()))
            .unwrap_or(false),
        Predicate::Between { field, start, end } => match record.value(field).as_date() {
            Some(date) => {
                start.map_or(true, |start| date >= start) && end.map_or(true, |end| date <= end)
            }
            None => false,
        },
        // Resolved away before testing
        Predicate::In { .. } => false,
        Predicate::And(items) => items.iter().all(|item| test(record, item)),
        Predicate::Or(items) => items.iter().any(|item| test(record, item)),
    }
}

/// Candidate ids when some conjunct pins `id` to a known set.
fn seed_ids(predicate: &Predicate) -> Option<Vec<RecordId>> {
    predicate.conjuncts().iter().find_map(|conjunct| match conjunct {
        Predicate::Eq { field, value } if field == ID_FIELD => {
            Some(value.as_record().into_iter().collect())
        }
        Predicate::Or(items) => items
            .iter()
            .map(|item| match item {
                Predicate::Eq { field, value } if field == ID_FIELD => value.as_record(),
                _ => None,
            })
            .collect(),
        _ => None,
    })
}

/// A conjunct usable against the field index.
fn indexed_equality(predicate: &Predicate) -> Option<(&str, &Value)> {
    predicate.conjuncts().iter().find_map(|conjunct| match conjunct {
        Predicate::Eq { field, value } if !value.is_null() && value.as_list().is_none() => {
            Some((field.as_str(), value))
        }
        _ => None,
    })
}
