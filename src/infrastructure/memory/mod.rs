//! In-memory repositories for development runs and tests

mod reservation;
mod user;

use std::sync::Arc;

pub use reservation::InMemoryReservationRepository;
pub use user::InMemoryUserRepository;

use crate::domain::{RepositoryProvider, ReservationRepository, UserRepository};

/// Both in-memory repositories sharing one user table.
pub struct InMemoryRepositoryProvider {
    users: Arc<InMemoryUserRepository>,
    reservations: Arc<InMemoryReservationRepository>,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let reservations = Arc::new(InMemoryReservationRepository::new(users.clone()));
        Self {
            users,
            reservations,
        }
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn reservations(&self) -> Arc<dyn ReservationRepository> {
        self.reservations.clone()
    }
}
