//! Migrator registering entity-specific migrations in dependency order.
pub use sea_orm_migration::prelude::*;

mod m20240915_000001_create_users;
mod m20240915_000002_create_applications;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240915_000001_create_users::Migration),
            Box::new(m20240915_000002_create_applications::Migration),
        ]
    }
}
