//! The reply envelope.

use serde::Serialize;
use serde_json::Value as Json;

use crate::error::SessionError;

/// `{code, message, result}` returned for every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    pub code: u16,
    pub message: String,
    pub result: Json,
}

impl Reply {
    pub fn success(result: Json) -> Self {
        Self {
            code: 200,
            message: "success".to_string(),
            result,
        }
    }

    pub fn failure(error: &SessionError) -> Self {
        Self {
            code: error.kind().code(),
            message: error.to_string(),
            result: Json::Null,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == 200
    }
}

impl From<Result<Json, SessionError>> for Reply {
    fn from(result: Result<Json, SessionError>) -> Self {
        match result {
            Ok(value) => Reply::success(value),
            Err(e) => Reply::failure(&e),
        }
    }
}
