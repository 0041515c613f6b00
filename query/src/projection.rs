//! Response-shape projection.
//!
//! Projection is driven by the field table: secret and hidden fields are
//! dropped, choices project to their label, and expanded references project
//! to a nested `{id, <display field>, ...}` object.

use crate::{QueryError, QueryResult};
use serde_json::{json, Map, Value as Json};
use warden_core::{Record, Value, ID_FIELD};
use warden_registry::{FieldDef, FieldKind, Registry, TypeDef};
use warden_store::Store;

/// Projects stored records into JSON response objects.
pub struct Projector<'a> {
    registry: &'a Registry,
    store: &'a Store,
}

impl<'a> Projector<'a> {
    pub fn new(registry: &'a Registry, store: &'a Store) -> Self {
        Self { registry, store }
    }

    /// Full projection of a record, as returned by `list`.
    pub fn project(&self, record: &Record) -> QueryResult<Json> {
        let type_def = self.type_of(record)?;

        let mut object = Map::new();
        object.insert(ID_FIELD.to_string(), json!(record.id.raw()));
        for field in &type_def.fields {
            if !is_projected(field) {
                continue;
            }
            let value = record.field(&field.name).unwrap_or(&Value::Null);
            object.insert(field.name.clone(), self.field_value(field, value)?);
        }
        Ok(Json::Object(object))
    }

    /// Compact projection of a referenced record: id, display field and its
    /// own expanded references.
    fn embed(&self, record: &Record) -> QueryResult<Json> {
        let type_def = self.type_of(record)?;

        let mut object = Map::new();
        object.insert(ID_FIELD.to_string(), json!(record.id.raw()));
        for field in &type_def.fields {
            let is_display = type_def.display_field.as_deref() == Some(field.name.as_str());
            let is_expanded = matches!(field.kind, FieldKind::Ref { expand: true, .. });
            if !(is_display || is_expanded) || !is_projected(field) {
                continue;
            }
            let value = record.field(&field.name).unwrap_or(&Value::Null);
            object.insert(field.name.clone(), self.field_value(field, value)?);
        }
        Ok(Json::Object(object))
    }

    fn field_value(&self, field: &FieldDef, value: &Value) -> QueryResult<Json> {
        if value.is_null() {
            return Ok(Json::Null);
        }
        match &field.kind {
            FieldKind::Choice { .. } => Ok(field
                .choice_label(value)
                .map(|label| json!(label))
                .unwrap_or(Json::Null)),
            FieldKind::Ref { expand: true, .. } => {
                let Some(id) = value.as_record() else {
                    return Ok(to_json(value));
                };
                let target = self
                    .store
                    .get(id)
                    .ok_or_else(|| QueryError::dangling_reference(&field.name, id.raw()))?;
                self.embed(target)
            }
            _ => Ok(to_json(value)),
        }
    }

    fn type_of(&self, record: &Record) -> QueryResult<&'a TypeDef> {
        self.registry
            .get_type(record.type_id)
            .ok_or_else(|| QueryError::unknown_type(record.type_id.to_string()))
    }
}

fn is_projected(field: &FieldDef) -> bool {
    !field.hidden && !matches!(field.kind, FieldKind::Secret { .. })
}

/// Plain JSON form of a stored value.
fn to_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Bool(b) => json!(b),
        Value::Int(i) => json!(i),
        Value::String(s) => json!(s),
        Value::Date(d) => json!(d.format("%Y-%m-%d").to_string()),
        Value::Ref(id) => json!(id.raw()),
        Value::List(items) => Json::Array(items.iter().map(to_json).collect()),
    }
}
