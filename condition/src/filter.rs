//! Filter spec to predicate.

use crate::{and_all, ConditionError, ConditionResult};
use warden_core::{FilterSpec, Predicate, RecordId, TypeId, Value, ID_FIELD};
use warden_registry::{FieldDef, FieldKind, FilterKind, Registry, TypeDef};

/// Builds a predicate from a filter spec using the type's field table.
///
/// Each present field contributes one sub-predicate and the results are
/// conjoined. An empty filter selects every row of the type.
pub struct FilterConditionBuilder<'r> {
    registry: &'r Registry,
}

impl<'r> FilterConditionBuilder<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    pub fn build(&self, type_id: TypeId, filter: &FilterSpec) -> ConditionResult<Predicate> {
        let type_def = self
            .registry
            .get_type(type_id)
            .ok_or_else(|| ConditionError::unknown_type(type_id.to_string()))?;

        let parts = filter
            .iter()
            .map(|(name, value)| field_condition(type_def, name, value))
            .collect::<ConditionResult<Vec<_>>>()?;

        let predicate = and_all(parts);
        tracing::trace!(type_name = %type_def.name, %predicate, "built filter condition");
        Ok(predicate)
    }
}

fn field_condition(type_def: &TypeDef, name: &str, value: &Value) -> ConditionResult<Predicate> {
    if name == ID_FIELD {
        return Ok(Predicate::eq(ID_FIELD, reference(name, value)?));
    }

    let field = type_def
        .get_field(name)
        .ok_or_else(|| ConditionError::unknown_field(&type_def.name, name))?;
    let kind = field
        .filter
        .ok_or_else(|| ConditionError::not_filterable(&type_def.name, name))?;

    match kind {
        FilterKind::Exact => exact(field, value),
        FilterKind::Contains => match value {
            Value::String(fragment) => Ok(Predicate::contains(name, fragment.clone())),
            other => Err(mismatch(name, "a string", other)),
        },
        FilterKind::DateRange => date_range(field, value),
    }
}

fn exact(field: &FieldDef, value: &Value) -> ConditionResult<Predicate> {
    let name = field.name.as_str();
    if value.is_null() {
        if field.nullable {
            return Ok(Predicate::eq(name, Value::Null));
        }
        return Err(ConditionError::invalid_filter_value(name, "field is not nullable"));
    }

    match &field.kind {
        FieldKind::Ref { .. } => Ok(Predicate::eq(name, reference(name, value)?)),
        FieldKind::Choice { options } => {
            if options.iter().any(|(_, stored)| stored == value) {
                Ok(Predicate::eq(name, value.clone()))
            } else {
                Err(ConditionError::invalid_filter_value(
                    name,
                    format!("{} is not one of the declared choices", value),
                ))
            }
        }
        FieldKind::Int => match value {
            Value::Int(_) => Ok(Predicate::eq(name, value.clone())),
            other => Err(mismatch(name, "an integer", other)),
        },
        FieldKind::Bool => match value {
            Value::Bool(_) => Ok(Predicate::eq(name, value.clone())),
            other => Err(mismatch(name, "a boolean", other)),
        },
        FieldKind::Text => match value {
            Value::String(_) => Ok(Predicate::eq(name, value.clone())),
            other => Err(mismatch(name, "a string", other)),
        },
        FieldKind::Date => match value {
            Value::Date(_) => Ok(Predicate::eq(name, value.clone())),
            other => Err(mismatch(name, "a date", other)),
        },
        FieldKind::Secret { .. } => Err(ConditionError::invalid_filter_value(
            name,
            "secret fields cannot be filtered",
        )),
    }
}

/// A single date selects that day; `[start, end]` with either bound null is open on that side.
fn date_range(field: &FieldDef, value: &Value) -> ConditionResult<Predicate> {
    let name = field.name.as_str();
    match value {
        Value::Date(day) => Ok(Predicate::eq(name, *day)),
        Value::Null if field.nullable => Ok(Predicate::eq(name, Value::Null)),
        Value::List(bounds) if bounds.len() == 2 => {
            let bound = |v: &Value| match v {
                Value::Null => Ok(None),
                Value::Date(d) => Ok(Some(*d)),
                other => Err(mismatch(name, "a date or null bound", other)),
            };
            let start = bound(&bounds[0])?;
            let end = bound(&bounds[1])?;
            Ok(Predicate::between(name, start, end))
        }
        other => Err(mismatch(name, "a date or a two-element date range", other)),
    }
}

/// Record ids arrive as integers or references.
fn reference(name: &str, value: &Value) -> ConditionResult<Value> {
    match value {
        Value::Ref(_) => Ok(value.clone()),
        Value::Int(raw) => u64::try_from(*raw)
            .map(|raw| Value::Ref(RecordId::new(raw)))
            .map_err(|_| ConditionError::invalid_filter_value(name, "ids are non-negative")),
        other => Err(mismatch(name, "a record id", other)),
    }
}

fn mismatch(name: &str, expected: &str, got: &Value) -> ConditionError {
    ConditionError::invalid_filter_value(
        name,
        format!("expected {}, got {}", expected, got.type_name()),
    )
}
