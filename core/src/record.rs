//! Record structure for Warden.
//!
//! A record is one stored row of a resource type. Its identity is held
//! outside the field map and is exposed to predicates as the `id` field.

use crate::{Fields, RecordId, TypeId, Value};

/// Name under which a record's identity is addressable by filters and rules.
pub const ID_FIELD: &str = "id";

/// A stored record.
#[derive(Debug, Clone)]
pub struct Record {
    /// Unique identifier for this record.
    pub id: RecordId,
    /// Type of this record (reference to registry).
    pub type_id: TypeId,
    /// Version number, bumped on every field write.
    pub version: u64,
    /// Field values.
    pub fields: Fields,
}

impl Record {
    /// Create a new record with the given properties.
    pub fn new(id: RecordId, type_id: TypeId, fields: Fields) -> Self {
        Self {
            id,
            type_id,
            version: 1,
            fields,
        }
    }

    /// Get a stored field value by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Resolve a field for predicate evaluation.
    ///
    /// `id` resolves to a reference to the record itself; absent fields resolve to null.
    pub fn value(&self, name: &str) -> Value {
        if name == ID_FIELD {
            return Value::Ref(self.id);
        }
        self.fields.get(name).cloned().unwrap_or(Value::Null)
    }

    /// Set a field value.
    pub fn set_field(&mut self, name: String, value: Value) {
        self.fields.insert(name, value);
        self.version += 1;
    }

    /// Remove a field.
    pub fn remove_field(&mut self, name: &str) -> Option<Value> {
        let result = self.fields.remove(name);
        if result.is_some() {
            self.version += 1;
        }
        result
    }
}
