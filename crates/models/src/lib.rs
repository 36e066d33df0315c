//! SeaORM entities for the blog schema plus the small write helpers the
//! service layer composes inside a unit of work.

pub mod errors;
pub mod db;
pub mod validate;
pub mod category;
pub mod tag;
pub mod post;
pub mod post_tag;

#[cfg(test)]
mod tests;
