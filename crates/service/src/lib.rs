//! Service layer providing blog operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Writes and post page reads run inside one unit of work.

pub mod errors;
pub mod uow;
pub mod format;
pub mod metrics;
pub mod db;
pub mod blog;
#[cfg(test)]
pub mod test_support;

pub use blog::{BlogConfig, BlogService};
pub use errors::ServiceError;
