use sea_orm_migration::prelude::*;

mod initial_001;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(initial_001::Migration)]
    }

    // modules share one database, each keeps its own history
    fn migration_table_name() -> DynIden {
        Alias::new("assets_seaql_migrations").into_iden()
    }
}
