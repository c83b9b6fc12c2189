//! User aggregate
//!
//! Contains the User entity, the create DTO, and the repository interface.

pub mod model;
pub mod repository;

mod dto_create;

pub use model::{User, UserCredentials};

pub use dto_create::CreateUserDto;

pub use repository::UserRepository;
