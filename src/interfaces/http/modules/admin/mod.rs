//! Admin module: moderation of all reservations

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
