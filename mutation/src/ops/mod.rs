//! Pipeline operations.
//!
//! - `references.rs` - foreign-key existence and permission checks
//! - `create.rs` - insert a new record
//! - `update.rs` - plan and apply bulk updates

mod create;
mod references;
mod update;

pub(crate) use create::execute_create;
pub(crate) use references::check_references;
pub(crate) use update::{apply_update, plan_update};
