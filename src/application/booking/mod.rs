//! Booking module: the reservation lifecycle

pub mod service;

pub use service::ReservationService;
