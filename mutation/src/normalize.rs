//! Domain normalization of filters and mutation objects.
//!
//! Choice labels become their stored value, foreign-key integers become
//! references, and a plaintext secret is replaced by its hash under the
//! field's storage name.

use sha2::{Digest, Sha256};
use warden_core::{Fields, FilterSpec, MutationObject, RecordId, Value};
use warden_registry::{FieldKind, TypeDef};

use crate::error::{MutationError, MutationResult};

/// One-way transform applied to secret fields before they are stored.
pub trait SecretHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> String;
}

/// Salted SHA-256, hex encoded.
#[derive(Debug, Clone, Default)]
pub struct Sha256Hasher {
    salt: String,
}

impl Sha256Hasher {
    pub fn new(salt: impl Into<String>) -> Self {
        Self { salt: salt.into() }
    }
}

impl SecretHasher for Sha256Hasher {
    fn hash(&self, plaintext: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.salt.as_bytes());
        hasher.update(plaintext.as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// Normalize a validated mutation object into storable field values.
pub(crate) fn normalize_object(
    type_def: &TypeDef,
    object: MutationObject,
    hasher: &dyn SecretHasher,
) -> MutationResult<Fields> {
    let mut changes = Fields::new();
    for (name, value) in object {
        let Some(field) = type_def.get_field(&name) else {
            return Err(MutationError::unknown_field(&type_def.name, &name));
        };
        match &field.kind {
            FieldKind::Secret { stored_as } => {
                let plaintext = value
                    .as_str()
                    .ok_or_else(|| MutationError::invalid_value(&name, "expected a string"))?;
                changes.insert(stored_as.clone(), Value::String(hasher.hash(plaintext)));
            }
            FieldKind::Choice { .. } => {
                let stored = choice(type_def, &name, value)?;
                changes.insert(name, stored);
            }
            FieldKind::Ref { .. } => {
                let reference = reference(&name, value)?;
                changes.insert(name, reference);
            }
            _ => {
                changes.insert(name, value);
            }
        }
    }
    Ok(changes)
}

/// Map choice labels in a filter to their stored values.
pub(crate) fn normalize_filter(type_def: &TypeDef, filter: FilterSpec) -> MutationResult<FilterSpec> {
    filter
        .into_iter()
        .map(|(name, value)| {
            let is_choice = matches!(
                type_def.get_field(&name).map(|f| &f.kind),
                Some(FieldKind::Choice { .. })
            );
            if is_choice {
                let stored = choice(type_def, &name, value)?;
                Ok((name, stored))
            } else {
                Ok((name, value))
            }
        })
        .collect()
}

fn choice(type_def: &TypeDef, name: &str, value: Value) -> MutationResult<Value> {
    let Some(field) = type_def.get_field(name) else {
        return Err(MutationError::unknown_field(&type_def.name, name));
    };
    match &value {
        Value::String(label) => field.choice_value(label).cloned().ok_or_else(|| {
            MutationError::invalid_value(
                name,
                format!("\"{}\" is not one of the declared choices", label),
            )
        }),
        _ if field.choice_label(&value).is_some() => Ok(value),
        other => Err(MutationError::invalid_value(
            name,
            format!("expected a choice label, got {}", other.type_name()),
        )),
    }
}

fn reference(name: &str, value: Value) -> MutationResult<Value> {
    match value {
        Value::Int(raw) => u64::try_from(raw)
            .map(|raw| Value::Ref(RecordId::new(raw)))
            .map_err(|_| MutationError::invalid_value(name, "ids are non-negative")),
        other => Ok(other),
    }
}
