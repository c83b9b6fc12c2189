//! Cryptographic helpers

pub mod password;

pub use password::PasswordHasher;
