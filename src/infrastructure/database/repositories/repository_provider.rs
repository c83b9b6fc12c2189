//! SeaORM implementation of RepositoryProvider

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::domain::{RepositoryProvider, ReservationRepository, UserRepository};

use super::reservation_repository::SeaOrmReservationRepository;
use super::user_repository::SeaOrmUserRepository;

/// Repository provider backed by one SeaORM connection pool.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let user = repos.users().get_user_by_id(1).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    users: Arc<SeaOrmUserRepository>,
    reservations: Arc<SeaOrmReservationRepository>,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(SeaOrmUserRepository::new(db.clone())),
            reservations: Arc::new(SeaOrmReservationRepository::new(db)),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn reservations(&self) -> Arc<dyn ReservationRepository> {
        self.reservations.clone()
    }
}
