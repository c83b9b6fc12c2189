//! SeaORM repository implementations

pub mod repository_provider;
pub mod reservation_repository;
pub mod user_repository;

pub use repository_provider::SeaOrmRepositoryProvider;
pub use reservation_repository::SeaOrmReservationRepository;
pub use user_repository::SeaOrmUserRepository;

#[cfg(test)]
pub(crate) mod test_support {
    use sea_orm::DatabaseConnection;
    use sea_orm_migration::MigratorTrait;

    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::{init_database, DatabaseConfig};

    /// Fresh in-memory SQLite database with all migrations applied.
    pub async fn migrated_db() -> DatabaseConnection {
        let db = init_database(&DatabaseConfig::sqlite_in_memory())
            .await
            .unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }
}
