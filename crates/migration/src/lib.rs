//! Migrator registering entity-specific migrations in dependency order.
//! Column additions come after the index migration so existing databases upgrade in place.
pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_category;
mod m20240601_000002_create_tag;
mod m20240601_000003_create_post;
mod m20240601_000004_create_post_tag;
mod m20240601_000005_add_indexes;
mod m20240601_000006_add_post_utc_offset;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_category::Migration),
            Box::new(m20240601_000002_create_tag::Migration),
            Box::new(m20240601_000003_create_post::Migration),
            Box::new(m20240601_000004_create_post_tag::Migration),
            Box::new(m20240601_000005_add_indexes::Migration),
            Box::new(m20240601_000006_add_post_utc_offset::Migration),
        ]
    }
}
