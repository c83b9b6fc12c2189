//! Identity module: registration, login and principal lookup
//!
//! Contains the `AuthService` used by the HTTP layer and the `seed_users`
//! routine used by the CLI.

pub mod seed;
pub mod service;

pub use seed::{seed_users, SeedUser};
pub use service::AuthService;
