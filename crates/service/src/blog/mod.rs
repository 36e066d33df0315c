//! Blog module: three-layer architecture (domain, repository, service).
//!
//! Posts, tags and categories. The service maps entities to DTOs, formats
//! dates and groups listings; repositories own persistence and transactions.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::{BlogConfig, BlogService};
