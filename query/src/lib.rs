//! Warden Query
//!
//! Read path for resource listings.
//!
//! Responsibilities:
//! - Execute a composed predicate against the store in creation order
//! - Slice the ordered result into a page
//! - Project each record into its response shape

mod error;
mod executor;
mod pagination;
mod projection;

pub use error::{QueryError, QueryResult};
pub use executor::QueryExecutor;
pub use pagination::{paginate, Page};
pub use projection::Projector;
