//! Warden Session
//!
//! The JSON boundary in front of the resource pipeline.
//!
//! Responsibilities:
//! - Dispatch `/<resource>/<list|update|create>` routes
//! - Decode and validate request bodies against the field table
//! - Hold the shared store behind a read/write lock
//! - Map failures to the reply envelope
//! - Configuration and logging setup

mod config;
mod error;
pub mod logging;
mod reply;
mod request;
mod session;
mod validate;

pub use config::SessionConfig;
pub use error::{ErrorKind, SessionError, SessionResult};
pub use reply::Reply;
pub use request::{CreateRequest, ListRequest, UpdateRequest};
pub use session::{Action, Session};
