use migration::{Migrator, MigratorTrait, SchemaManager};
use sea_orm::{DatabaseConnection, DbErr};

pub async fn migrate(conn: &DatabaseConnection) -> Result<(), DbErr> {
    let schema_manager = SchemaManager::new(conn);
    Migrator::up(conn, None).await?;
    if !schema_manager.has_table("tournaments").await? {
        return Err(DbErr::Migration("tournaments table missing after migration".into()));
    }
    Ok(())
}
