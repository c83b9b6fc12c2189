pub mod booking;
pub mod identity;

pub use booking::ReservationService;
pub use identity::{seed_users, AuthService, SeedUser};
