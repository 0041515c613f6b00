//! Request bodies.

use serde::Deserialize;
use serde_json::{Map, Value as Json};

/// `{page, limit, filter}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListRequest {
    pub page: u64,
    pub limit: u64,
    pub filter: Map<String, Json>,
}

/// `{filter, obj}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateRequest {
    pub filter: Map<String, Json>,
    pub obj: Map<String, Json>,
}

/// `{obj}` with every updatable field present.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateRequest {
    pub obj: Map<String, Json>,
}
