//! Condition error types.

use thiserror::Error;

/// Result type for condition operations.
pub type ConditionResult<T> = Result<T, ConditionError>;

/// Errors that can occur while building or evaluating conditions.
#[derive(Debug, Error)]
pub enum ConditionError {
    #[error("Unknown type: {name}")]
    UnknownType { name: String },

    #[error("Unknown field: {field} on type {type_name}")]
    UnknownField { type_name: String, field: String },

    #[error("Field {field} on type {type_name} is not filterable")]
    NotFilterable { type_name: String, field: String },

    #[error("Invalid filter value for {field}: {message}")]
    InvalidFilterValue { field: String, message: String },
}

impl ConditionError {
    pub fn unknown_type(name: impl Into<String>) -> Self {
        Self::UnknownType { name: name.into() }
    }

    pub fn unknown_field(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField {
            type_name: type_name.into(),
            field: field.into(),
        }
    }

    pub fn not_filterable(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::NotFilterable {
            type_name: type_name.into(),
            field: field.into(),
        }
    }

    pub fn invalid_filter_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidFilterValue {
            field: field.into(),
            message: message.into(),
        }
    }
}
