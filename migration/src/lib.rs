pub use sea_orm_migration::prelude::*;

mod m20261001_000001_create_users_and_posts;
mod m20261002_000001_add_lottery_rounds;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_users_and_posts::Migration),
            Box::new(m20261002_000001_add_lottery_rounds::Migration),
        ]
    }
}
