//! Reservation aggregate
//!
//! Contains the Reservation entity, its status, the create DTO, and the
//! repository interface.

pub mod model;
pub mod repository;

mod dto_create;

pub use dto_create::CreateReservationDto;
pub use model::{Reservation, ReservationStatus};
pub use repository::ReservationRepository;
