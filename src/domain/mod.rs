//! Domain layer: entities, status rules and repository interfaces.

pub mod repositories;
pub mod reservation;
pub mod user;

pub use repositories::RepositoryProvider;
pub use reservation::{CreateReservationDto, Reservation, ReservationRepository, ReservationStatus};
pub use user::{CreateUserDto, User, UserCredentials, UserRepository};

// Re-export DomainError for convenience
pub use crate::shared::errors::{DomainError, DomainResult};
