//! Field validation helpers for mutation objects.

use warden_core::{MutationObject, Value, ID_FIELD};
use warden_registry::{FieldDef, FieldKind, Registry, TypeDef};

use crate::error::{MutationError, MutationResult};

/// Validate a mutation object against the type's field table.
///
/// Every key must name an updatable field and carry a value of the field's
/// kind. With `require_all`, every updatable field must be present.
pub fn validate_object(
    registry: &Registry,
    type_def: &TypeDef,
    object: &MutationObject,
    require_all: bool,
) -> MutationResult<()> {
    for (name, value) in object {
        if name == ID_FIELD {
            return Err(MutationError::readonly_field(&type_def.name, name));
        }
        let field = type_def
            .get_field(name)
            .ok_or_else(|| MutationError::unknown_field(&type_def.name, name))?;
        if !field.updatable {
            return Err(MutationError::readonly_field(&type_def.name, name));
        }
        validate_value(registry, type_def, field, value)?;
    }

    if require_all {
        if let Some(missing) = type_def
            .updatable_fields()
            .find(|field| !object.contains_key(&field.name))
        {
            return Err(MutationError::missing_required(&type_def.name, &missing.name));
        }
    }

    Ok(())
}

/// Validate one value against its field definition.
pub fn validate_value(
    registry: &Registry,
    type_def: &TypeDef,
    field: &FieldDef,
    value: &Value,
) -> MutationResult<()> {
    let name = field.name.as_str();

    if value.is_null() {
        if field.nullable {
            return Ok(());
        }
        return Err(MutationError::invalid_value(name, "cannot be null"));
    }

    let compatible = match (&field.kind, value) {
        (FieldKind::Int, Value::Int(_)) => true,
        (FieldKind::Bool, Value::Bool(_)) => true,
        (FieldKind::Date, Value::Date(_)) => true,
        (FieldKind::Secret { .. }, Value::String(_)) => true,
        (FieldKind::Ref { .. }, Value::Ref(_)) => true,
        (FieldKind::Ref { .. }, Value::Int(raw)) => *raw >= 0,
        (FieldKind::Text, Value::String(s)) => {
            if let Some(pattern) = registry.field_pattern(type_def.id, name) {
                if !pattern.is_match(s) {
                    return Err(MutationError::invalid_value(
                        name,
                        format!("\"{}\" does not match {}", s, pattern.as_str()),
                    ));
                }
            }
            true
        }
        (FieldKind::Choice { .. }, Value::String(label)) => {
            if field.choice_value(label).is_none() {
                return Err(MutationError::invalid_value(
                    name,
                    format!("\"{}\" is not one of the declared choices", label),
                ));
            }
            true
        }
        _ => false,
    };

    if !compatible {
        return Err(MutationError::invalid_value(
            name,
            format!("expected {}, got {}", field.kind.type_name(), value.type_name()),
        ));
    }
    Ok(())
}
