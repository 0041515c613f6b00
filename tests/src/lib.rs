//! Warden Tests
//!
//! A seeded campus and reply assertions shared by the integration tests.

pub mod assertion;
pub mod fixture;

pub mod prelude {
    pub use crate::assertion::ReplyAssert;
    pub use crate::fixture::Campus;
    pub use serde_json::{json, Value as Json};
    pub use warden_core::{Caller, Capability, RecordId};
    pub use warden_session::{Reply, Session, SessionConfig};
}
