//! Warden Mutation
//!
//! The resource pipeline shared by every resource type.
//!
//! Responsibilities:
//! - Validate mutation objects against the field table
//! - Normalize choice labels and hash secrets
//! - Check foreign-key references against the caller's write capabilities
//! - Split update targets into the readable and writable sets
//! - Apply creates and bulk updates

mod error;
mod normalize;
mod ops;
mod pipeline;
mod result;
mod validation;

pub use error::{MutationError, MutationResult};
pub use normalize::{SecretHasher, Sha256Hasher};
pub use pipeline::{read_capabilities, write_capabilities, ResourceMutationPipeline};
pub use result::{UpdateOutcome, UpdatePlan};
