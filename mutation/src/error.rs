//! Mutation error types.

use thiserror::Error;
use warden_condition::ConditionError;
use warden_core::StoreError;
use warden_query::QueryError;

/// Result type for mutation operations.
pub type MutationResult<T> = Result<T, MutationError>;

/// Errors that can occur during pipeline execution.
#[derive(Debug, Error)]
pub enum MutationError {
    #[error("Unknown type: {name}")]
    UnknownType { name: String },

    #[error("Unknown field: {field} on type {type_name}")]
    UnknownField { type_name: String, field: String },

    #[error("Cannot modify readonly field: {field} on type {type_name}")]
    ReadonlyField { type_name: String, field: String },

    #[error("Missing required field: {field} on type {type_name}")]
    MissingRequired { type_name: String, field: String },

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// No visible row matched, or a referenced row does not exist.
    #[error("{type_name} not found")]
    NotFound { type_name: String },

    #[error("Permission denied on {type_name}")]
    PermissionDenied { type_name: String },

    #[error(transparent)]
    Condition(#[from] ConditionError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl MutationError {
    pub fn unknown_type(name: impl Into<String>) -> Self {
        Self::UnknownType { name: name.into() }
    }

    pub fn unknown_field(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField {
            type_name: type_name.into(),
            field: field.into(),
        }
    }

    pub fn readonly_field(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::ReadonlyField {
            type_name: type_name.into(),
            field: field.into(),
        }
    }

    pub fn missing_required(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingRequired {
            type_name: type_name.into(),
            field: field.into(),
        }
    }

    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(type_name: impl Into<String>) -> Self {
        Self::NotFound {
            type_name: type_name.into(),
        }
    }

    pub fn permission_denied(type_name: impl Into<String>) -> Self {
        Self::PermissionDenied {
            type_name: type_name.into(),
        }
    }
}
