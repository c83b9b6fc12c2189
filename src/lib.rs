//! # Vesuvio reservation service
//!
//! Backend for table reservations at a single restaurant: customers
//! register, book and cancel; staff list, confirm and cancel bookings.
//!
//! ## Architecture
//!
//! - **domain**: users, reservations, status rules and repository traits
//! - **application**: `AuthService`, `ReservationService` and user seeding
//! - **infrastructure**: SeaORM storage, in-memory storage, password hashing
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: runtime lifecycle used by the CLI binary

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{init_database, DatabaseConfig};

pub use interfaces::http::create_api_router;
