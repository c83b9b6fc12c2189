//! Initial user provisioning

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{CreateUserDto, DomainError, DomainResult, UserRepository};
use crate::infrastructure::crypto::PasswordHasher;
use crate::shared::validations::normalize_email;

/// One account to provision, as listed in the `[seed]` config section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedUser {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Create every listed user that does not exist yet.
///
/// Returns the number of users created. Existing emails are left untouched.
pub async fn seed_users(
    repo: &dyn UserRepository,
    hasher: &PasswordHasher,
    users: &[SeedUser],
) -> DomainResult<usize> {
    let mut created = 0;

    for seed in users {
        let email = normalize_email(&seed.email);
        if email.is_empty() || seed.password.trim().is_empty() {
            return Err(DomainError::invalid_input(
                "seed user requires email and password",
            ));
        }

        if repo.get_user_by_email(&email).await?.is_some() {
            info!(email = %email, "Seed user already exists, skipping");
            continue;
        }

        let password_hash = hasher
            .hash(&seed.password)
            .map_err(|e| DomainError::Internal(format!("failed to hash password: {}", e)))?;

        let user = repo
            .create_user(CreateUserDto {
                name: seed.name.trim().to_string(),
                email,
                password_hash,
                is_admin: seed.is_admin,
            })
            .await?;

        info!(user_id = user.id, email = %user.email, is_admin = user.is_admin, "Seed user created");
        created += 1;
    }

    Ok(created)
}
