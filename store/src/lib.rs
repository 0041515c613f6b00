//! Warden Record Storage
//!
//! This crate provides the in-memory record store with indexed access:
//! - Record storage keyed by identity, iterated in creation order
//! - Type index: Find records by resource type
//! - Field index: Find records by exact field value
//!
//! A `Store` is the storage-session context handed to every pipeline call;
//! nothing in Warden holds one as ambient state.

mod index;
mod store;

pub use store::*;
