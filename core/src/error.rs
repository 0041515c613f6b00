//! Common error types for Warden.

use crate::{RecordId, TypeId};
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Record not found.
    #[error("Record not found: {0}")]
    RecordNotFound(RecordId),

    /// Record exists but belongs to another type.
    #[error("Record {id} is not of type {expected}")]
    WrongType { id: RecordId, expected: TypeId },

    /// The identity field cannot be written.
    #[error("Field 'id' is assigned by the store and cannot be set")]
    IdentityReadonly,
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
