//! Core record storage implementation.

use crate::index::{FieldIndex, TypeIndex};
use std::collections::HashMap;
use warden_core::{Fields, Record, RecordId, StoreError, StoreResult, TypeId, Value, ID_FIELD};

/// ID allocator for records.
#[derive(Debug)]
struct IdAllocator {
    next_record_id: u64,
}

impl IdAllocator {
    fn new() -> Self {
        Self { next_record_id: 1 }
    }

    fn alloc(&mut self) -> RecordId {
        let id = RecordId::new(self.next_record_id);
        self.next_record_id += 1;
        id
    }
}

/// The in-memory record store.
///
/// Each individual write (`create_record`, `set_field`) is atomic with respect
/// to readers holding the store; sequences of writes are not.
#[derive(Debug)]
pub struct Store {
    /// Record storage
    records: HashMap<RecordId, Record>,
    /// ID allocator
    id_alloc: IdAllocator,
    /// Type index
    type_index: TypeIndex,
    /// Field index
    field_index: FieldIndex,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
            id_alloc: IdAllocator::new(),
            type_index: TypeIndex::new(),
            field_index: FieldIndex::new(),
        }
    }

    // ==================== Record Operations ====================

    /// Create a new record with the given type and fields.
    pub fn create_record(&mut self, type_id: TypeId, fields: Fields) -> StoreResult<RecordId> {
        if fields.contains_key(ID_FIELD) {
            return Err(StoreError::IdentityReadonly);
        }

        let id = self.id_alloc.alloc();
        let record = Record::new(id, type_id, fields);

        // Update indexes
        self.type_index.insert(type_id, id);
        for (name, value) in &record.fields {
            self.field_index.insert(type_id, name, value, id);
        }

        self.records.insert(id, record);
        Ok(id)
    }

    /// Get a record by ID.
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.get(&id)
    }

    /// Get a record by ID, requiring it to be of the given type.
    pub fn get_of_type(&self, type_id: TypeId, id: RecordId) -> StoreResult<&Record> {
        let record = self.records.get(&id).ok_or(StoreError::RecordNotFound(id))?;
        if record.type_id != type_id {
            return Err(StoreError::WrongType {
                id,
                expected: type_id,
            });
        }
        Ok(record)
    }

    /// Set a field on a record.
    pub fn set_field(&mut self, id: RecordId, name: &str, value: Value) -> StoreResult<()> {
        if name == ID_FIELD {
            return Err(StoreError::IdentityReadonly);
        }

        let record = self
            .records
            .get_mut(&id)
            .ok_or(StoreError::RecordNotFound(id))?;
        let type_id = record.type_id;

        // Remove old value from index
        if let Some(old_value) = record.fields.get(name) {
            self.field_index.remove(type_id, name, old_value, id);
        }

        // Add new value to index
        self.field_index.insert(type_id, name, &value, id);

        record.set_field(name.to_string(), value);

        Ok(())
    }

    // ==================== Query Operations ====================

    /// Find record IDs by type, in creation order.
    pub fn ids_by_type(&self, type_id: TypeId) -> impl Iterator<Item = RecordId> + '_ {
        self.type_index.get(type_id)
    }

    /// Iterate records of a type, in creation order.
    pub fn records_by_type(&self, type_id: TypeId) -> impl Iterator<Item = &Record> + '_ {
        self.type_index
            .get(type_id)
            .filter_map(move |id| self.records.get(&id))
    }

    /// Find record IDs by field value (exact match), in creation order.
    pub fn ids_by_field(
        &self,
        type_id: TypeId,
        name: &str,
        value: &Value,
    ) -> impl Iterator<Item = RecordId> + '_ {
        self.field_index.find_exact(type_id, name, value)
    }

    // ==================== Statistics ====================

    /// Get the number of records of a type.
    pub fn count(&self, type_id: TypeId) -> usize {
        self.type_index.count(type_id)
    }

    /// Get the number of records in the store.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
