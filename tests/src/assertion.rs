//! Assertions on reply envelopes.

use serde_json::Value as Json;
use warden_session::Reply;

/// Fluent checks on a reply.
pub trait ReplyAssert {
    /// Assert success and return the result.
    fn ok(&self) -> &Json;
    /// Assert a failure with the given status code.
    fn fails_with(&self, code: u16);
    /// Assert a successful list and return its item ids.
    fn ids(&self) -> Vec<u64>;
    /// Assert a successful list and return its total.
    fn total(&self) -> u64;
}

impl ReplyAssert for Reply {
    fn ok(&self) -> &Json {
        assert!(self.is_success(), "expected success, got {:?}", self);
        &self.result
    }

    fn fails_with(&self, code: u16) {
        assert!(!self.is_success(), "expected failure, got {:?}", self);
        assert_eq!(self.code, code, "unexpected reply {:?}", self);
        assert_eq!(self.result, Json::Null);
    }

    fn ids(&self) -> Vec<u64> {
        self.ok()["items"]
            .as_array()
            .map(|items| items.iter().filter_map(|item| item["id"].as_u64()).collect())
            .unwrap_or_default()
    }

    fn total(&self) -> u64 {
        self.ok()["total"].as_u64().unwrap_or_default()
    }
}
