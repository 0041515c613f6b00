//! Warden Registry
//!
//! Runtime schema lookup. Single source of truth for resource types, their
//! field tables, and the `(type, capability)` row-selection rules.
//! The registry is immutable after construction via RegistryBuilder.

mod builder;
pub mod campus;
mod registry;
mod types;

pub use builder::{RegistryBuilder, RegistryError};
pub use registry::Registry;
pub use types::*;
