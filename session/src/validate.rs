//! Request decoding against the field table.
//!
//! JSON values are checked for shape and converted to field values here.
//! Filter values are also matched against declared patterns. For objects,
//! patterns, nullability and choice membership are enforced by the pipeline.

use chrono::NaiveDate;
use serde_json::{Map, Value as Json};
use warden_core::{FilterSpec, MutationObject, Value, ID_FIELD};
use warden_registry::{FieldDef, FieldKind, FilterKind, Registry, TypeDef};

use crate::error::{SessionError, SessionResult};

/// Decode a filter object. Only `id` and filterable fields are accepted.
pub fn decode_filter(
    registry: &Registry,
    type_def: &TypeDef,
    filter: &Map<String, Json>,
) -> SessionResult<FilterSpec> {
    let mut spec = FilterSpec::new();
    for (name, json) in filter {
        let value = if name == ID_FIELD {
            integer(name, json)?
        } else {
            let field = declared(type_def, name)?;
            match field.filter {
                Some(FilterKind::DateRange) => date_filter(name, json)?,
                Some(_) => {
                    let value = scalar(field, json)?;
                    check_pattern(registry, type_def, name, &value)?;
                    value
                }
                None => {
                    return Err(SessionError::validation(format!(
                        "{}.{} cannot be filtered on",
                        type_def.name, name
                    )))
                }
            }
        };
        spec.insert(name.clone(), value);
    }
    Ok(spec)
}

/// Decode a mutation object. Only updatable fields are accepted; with
/// `require_all` every updatable field must be present.
pub fn decode_object(
    type_def: &TypeDef,
    object: &Map<String, Json>,
    require_all: bool,
) -> SessionResult<MutationObject> {
    let mut decoded = MutationObject::new();
    for (name, json) in object {
        let field = declared(type_def, name)?;
        if !field.updatable {
            return Err(SessionError::validation(format!(
                "{}.{} is not updatable",
                type_def.name, name
            )));
        }
        decoded.insert(name.clone(), scalar(field, json)?);
    }

    if require_all {
        if let Some(missing) = type_def
            .updatable_fields()
            .find(|field| !object.contains_key(&field.name))
        {
            return Err(SessionError::validation(format!(
                "missing required property {}",
                missing.name
            )));
        }
    }
    Ok(decoded)
}

/// Page and limit must be positive; limit may be capped by configuration.
pub fn check_page(page: u64, limit: u64, max_limit: Option<u32>) -> SessionResult<()> {
    if page < 1 {
        return Err(SessionError::validation("page must be at least 1"));
    }
    if limit < 1 {
        return Err(SessionError::validation("limit must be at least 1"));
    }
    if let Some(max) = max_limit {
        if limit > u64::from(max) {
            return Err(SessionError::validation(format!(
                "limit {} exceeds the maximum of {}",
                limit, max
            )));
        }
    }
    Ok(())
}

fn check_pattern(
    registry: &Registry,
    type_def: &TypeDef,
    name: &str,
    value: &Value,
) -> SessionResult<()> {
    let (Some(text), Some(pattern)) = (value.as_str(), registry.field_pattern(type_def.id, name))
    else {
        return Ok(());
    };
    if pattern.is_match(text) {
        Ok(())
    } else {
        Err(SessionError::validation(format!(
            "{}: \"{}\" does not match {}",
            name,
            text,
            pattern.as_str()
        )))
    }
}

fn declared<'t>(type_def: &'t TypeDef, name: &str) -> SessionResult<&'t FieldDef> {
    type_def.get_field(name).ok_or_else(|| {
        SessionError::validation(format!("unknown property {} on {}", name, type_def.name))
    })
}

/// One field value in its plain JSON form.
fn scalar(field: &FieldDef, json: &Json) -> SessionResult<Value> {
    let name = field.name.as_str();
    if json.is_null() {
        return Ok(Value::Null);
    }
    match &field.kind {
        FieldKind::Int | FieldKind::Ref { .. } => integer(name, json),
        FieldKind::Bool => json
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| mismatch(name, "a boolean", json)),
        FieldKind::Text | FieldKind::Choice { .. } | FieldKind::Secret { .. } => json
            .as_str()
            .map(Value::from)
            .ok_or_else(|| mismatch(name, "a string", json)),
        FieldKind::Date => date(name, json),
    }
}

fn integer(name: &str, json: &Json) -> SessionResult<Value> {
    json.as_i64()
        .map(Value::Int)
        .ok_or_else(|| mismatch(name, "an integer", json))
}

fn date(name: &str, json: &Json) -> SessionResult<Value> {
    let text = json
        .as_str()
        .ok_or_else(|| mismatch(name, "a date string", json))?;
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map(Value::Date)
        .map_err(|_| SessionError::validation(format!("{}: \"{}\" is not a YYYY-MM-DD date", name, text)))
}

/// A single date, null, or a `[start, end]` pair whose bounds may be null.
fn date_filter(name: &str, json: &Json) -> SessionResult<Value> {
    match json {
        Json::Null => Ok(Value::Null),
        Json::Array(bounds) if bounds.len() == 2 => {
            let bound = |b: &Json| if b.is_null() { Ok(Value::Null) } else { date(name, b) };
            Ok(Value::List(vec![bound(&bounds[0])?, bound(&bounds[1])?]))
        }
        Json::Array(_) => Err(SessionError::validation(format!(
            "{}: a date range has exactly two bounds",
            name
        ))),
        other => date(name, other),
    }
}

fn mismatch(name: &str, expected: &str, got: &Json) -> SessionError {
    SessionError::validation(format!("{}: expected {}, got {}", name, expected, got))
}
