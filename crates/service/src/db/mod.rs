//! Query composition over the blog entities.
//!
//! Functions are generic over `ConnectionTrait` so they run the same on a
//! pooled connection or inside a unit of work.

pub mod post_service;
pub mod tag_service;
pub mod category_service;
