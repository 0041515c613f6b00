//! Query error types.

use thiserror::Error;
use warden_condition::ConditionError;

/// Result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors that can occur during query execution.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Unknown type: {name}")]
    UnknownType { name: String },

    #[error("Invalid page request: {message}")]
    InvalidPage { message: String },

    #[error("Dangling reference: {field} points at missing record #{id}")]
    DanglingReference { field: String, id: u64 },

    #[error(transparent)]
    Condition(#[from] ConditionError),
}

impl QueryError {
    pub fn unknown_type(name: impl Into<String>) -> Self {
        Self::UnknownType { name: name.into() }
    }

    pub fn invalid_page(message: impl Into<String>) -> Self {
        Self::InvalidPage {
            message: message.into(),
        }
    }

    pub fn dangling_reference(field: impl Into<String>, id: u64) -> Self {
        Self::DanglingReference {
            field: field.into(),
            id,
        }
    }
}
