//! Session error types.

use thiserror::Error;
use warden_condition::ConditionError;
use warden_mutation::MutationError;
use warden_query::QueryError;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Request body does not match the declared shape.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// No resource or action under this route.
    #[error("unknown route: {route}")]
    UnknownRoute { route: String },

    /// Configuration could not be loaded.
    #[error("config error: {message}")]
    Config { message: String },

    /// Failure unrelated to the request.
    #[error("internal error: {message}")]
    Internal { message: String },

    /// Pipeline error.
    #[error(transparent)]
    Mutation(#[from] MutationError),
}

/// How a failure is reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    PermissionDenied,
    Internal,
}

impl ErrorKind {
    /// Status code carried in the reply envelope.
    pub fn code(self) -> u16 {
        match self {
            ErrorKind::Validation => 400,
            ErrorKind::PermissionDenied => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::Internal => 500,
        }
    }
}

impl SessionError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn unknown_route(route: impl Into<String>) -> Self {
        Self::UnknownRoute {
            route: route.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Classify this error for the reply envelope.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::Validation { .. } => ErrorKind::Validation,
            SessionError::UnknownRoute { .. } => ErrorKind::NotFound,
            SessionError::Config { .. } | SessionError::Internal { .. } => ErrorKind::Internal,
            SessionError::Mutation(e) => match e {
                MutationError::UnknownField { .. }
                | MutationError::ReadonlyField { .. }
                | MutationError::MissingRequired { .. }
                | MutationError::InvalidValue { .. } => ErrorKind::Validation,
                MutationError::NotFound { .. } => ErrorKind::NotFound,
                MutationError::PermissionDenied { .. } => ErrorKind::PermissionDenied,
                MutationError::Condition(c) | MutationError::Query(QueryError::Condition(c)) => {
                    condition_kind(c)
                }
                MutationError::Query(QueryError::InvalidPage { .. }) => ErrorKind::Validation,
                MutationError::UnknownType { .. }
                | MutationError::Query(_)
                | MutationError::Store(_) => ErrorKind::Internal,
            },
        }
    }
}

fn condition_kind(error: &ConditionError) -> ErrorKind {
    match error {
        ConditionError::UnknownField { .. }
        | ConditionError::NotFilterable { .. }
        | ConditionError::InvalidFilterValue { .. } => ErrorKind::Validation,
        ConditionError::UnknownType { .. } => ErrorKind::Internal,
    }
}
