pub use sea_orm_migration::prelude::*;

mod m20200601_000001_create_users_table;
mod m20200601_000002_create_articles_table;
mod m20200602_000003_create_comments_and_resources;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20200601_000001_create_users_table::Migration),
            Box::new(m20200601_000002_create_articles_table::Migration),
            Box::new(m20200602_000003_create_comments_and_resources::Migration),
        ]
    }
}
