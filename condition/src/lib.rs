//! Warden Condition
//!
//! Builds and executes row-selection predicates:
//! - FilterConditionBuilder turns a filter spec into a predicate
//! - PermissionConditionBuilder turns requested capabilities into a predicate
//! - ConditionComposer conjoins predicates and checks single records
//! - Evaluator runs predicates as queries or against one loaded record

mod compose;
mod error;
mod eval;
mod filter;
mod permission;

pub use compose::{and, and_all, or, or_all, ConditionComposer};
pub use error::{ConditionError, ConditionResult};
pub use eval::Evaluator;
pub use filter::FilterConditionBuilder;
pub use permission::PermissionConditionBuilder;
