//! Database migrations

use sea_orm_migration::prelude::*;

mod m20251120_000001_init_schema;
mod m20251127_000001_add_reviewer_lookup_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251120_000001_init_schema::Migration),
            Box::new(m20251127_000001_add_reviewer_lookup_indexes::Migration),
        ]
    }
}
