//! Repository bundle for the domain layer

use std::sync::Arc;

use super::reservation::ReservationRepository;
use super::user::UserRepository;

/// Provides access to all domain repositories.
///
/// Both the SeaORM and the in-memory backends implement this, so the
/// server can wire services without knowing which store is behind them:
///
/// ```ignore
/// let auth = AuthService::new(repos.users());
/// let booking = ReservationService::new(repos.reservations());
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;
    fn reservations(&self) -> Arc<dyn ReservationRepository>;
}
