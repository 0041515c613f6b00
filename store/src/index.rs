//! Indexes for efficient record lookups.

use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};
use warden_core::{RecordId, TypeId, Value};

/// Type index: TypeId -> ordered Set<RecordId>
#[derive(Debug, Default)]
pub struct TypeIndex {
    index: HashMap<TypeId, BTreeSet<RecordId>>,
}

impl TypeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, type_id: TypeId, record_id: RecordId) {
        self.index.entry(type_id).or_default().insert(record_id);
    }

    /// Record IDs of a type in ascending (creation) order.
    pub fn get(&self, type_id: TypeId) -> impl Iterator<Item = RecordId> + '_ {
        self.index
            .get(&type_id)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    pub fn count(&self, type_id: TypeId) -> usize {
        self.index.get(&type_id).map(|set| set.len()).unwrap_or(0)
    }
}

/// Key for field index: (TypeId, field name, value)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldKey {
    pub type_id: TypeId,
    pub field: String,
    pub value: IndexValue,
}

/// Simplified value for field indexing.
/// Only scalar values are indexed; lists are matched by scanning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IndexValue {
    Null,
    Bool(bool),
    Int(i64),
    String(String),
    Date(NaiveDate),
    Ref(RecordId),
}

impl IndexValue {
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(IndexValue::Null),
            Value::Bool(b) => Some(IndexValue::Bool(*b)),
            Value::Int(i) => Some(IndexValue::Int(*i)),
            Value::String(s) => Some(IndexValue::String(s.clone())),
            Value::Date(d) => Some(IndexValue::Date(*d)),
            Value::Ref(id) => Some(IndexValue::Ref(*id)),
            Value::List(_) => None,
        }
    }
}

/// Field index: (TypeId, field, value) -> ordered Set<RecordId>
#[derive(Debug, Default)]
pub struct FieldIndex {
    exact: HashMap<FieldKey, BTreeSet<RecordId>>,
}

impl FieldIndex {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(type_id: TypeId, field: &str, value: &Value) -> Option<FieldKey> {
        IndexValue::from_value(value).map(|value| FieldKey {
            type_id,
            field: field.to_string(),
            value,
        })
    }

    pub fn insert(&mut self, type_id: TypeId, field: &str, value: &Value, record_id: RecordId) {
        if let Some(key) = Self::key(type_id, field, value) {
            self.exact.entry(key).or_default().insert(record_id);
        }
    }

    pub fn remove(&mut self, type_id: TypeId, field: &str, value: &Value, record_id: RecordId) {
        if let Some(key) = Self::key(type_id, field, value) {
            if let Some(set) = self.exact.get_mut(&key) {
                set.remove(&record_id);
                if set.is_empty() {
                    self.exact.remove(&key);
                }
            }
        }
    }

    pub fn find_exact(
        &self,
        type_id: TypeId,
        field: &str,
        value: &Value,
    ) -> impl Iterator<Item = RecordId> + '_ {
        Self::key(type_id, field, value)
            .and_then(|key| self.exact.get(&key))
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }
}
