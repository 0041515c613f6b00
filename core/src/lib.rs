//! Warden Core Types
//!
//! This crate provides the foundational types used throughout Warden:
//! - Identity types (RecordId, TypeId)
//! - Value types (the Value enum with scalar, date and reference types)
//! - Record structure (one stored row of a resource type)
//! - Callers and capabilities
//! - Predicates, filters and mutation objects
//! - Common error types

mod caller;
mod error;
mod id;
mod predicate;
mod record;
mod value;

pub use caller::*;
pub use error::*;
pub use id::*;
pub use predicate::*;
pub use record::*;
pub use value::*;
