//! Authentication service
//!
//! HTTP handlers and the auth middleware are thin wrappers over this type.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{CreateUserDto, DomainError, DomainResult, User, UserRepository};
use crate::infrastructure::crypto::PasswordHasher;
use crate::shared::validations::normalize_email;

/// Registers and authenticates users.
pub struct AuthService {
    repo: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
}

impl AuthService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self::with_hasher(repo, PasswordHasher::default())
    }

    pub fn with_hasher(repo: Arc<dyn UserRepository>, hasher: PasswordHasher) -> Self {
        Self { repo, hasher }
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a new, non-admin user.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> DomainResult<User> {
        let name = name.trim();
        let email = normalize_email(email);
        if name.is_empty() || email.is_empty() || password.trim().is_empty() {
            return Err(DomainError::invalid_input(
                "name, email and password are required",
            ));
        }

        if self.repo.get_user_by_email(&email).await?.is_some() {
            return Err(DomainError::EmailAlreadyExists);
        }

        let password_hash = self
            .hasher
            .hash(password)
            .map_err(|e| DomainError::Internal(format!("failed to hash password: {}", e)))?;

        let user = self
            .repo
            .create_user(CreateUserDto {
                name: name.to_string(),
                email,
                password_hash,
                is_admin: false,
            })
            .await?;

        info!(user_id = user.id, email = %user.email, "New user registered");
        Ok(user)
    }

    // ── Authentication ──────────────────────────────────────────

    /// Check an email/password pair.
    ///
    /// Unknown email and wrong password both yield `InvalidCredentials`.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<User> {
        let email = normalize_email(email);
        if email.is_empty() || password.trim().is_empty() {
            return Err(DomainError::invalid_input("email and password are required"));
        }

        let Some(credentials) = self.repo.get_user_by_email(&email).await? else {
            warn!(email = %email, "Login for unknown email");
            return Err(DomainError::InvalidCredentials);
        };

        if !self.hasher.matches(password, &credentials.password_hash) {
            warn!(user_id = credentials.user.id, "Login with wrong password");
            return Err(DomainError::InvalidCredentials);
        }

        Ok(credentials.user)
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn get_user_by_id(&self, id: i64) -> DomainResult<User> {
        self.repo
            .get_user_by_id(id)
            .await?
            .ok_or(DomainError::UserNotFound)
    }
}
