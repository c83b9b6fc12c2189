use async_trait::async_trait;

use super::{CreateUserDto, User, UserCredentials};
use crate::shared::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user. A duplicate email fails with `EmailAlreadyExists`.
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User>;

    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<UserCredentials>>;
    async fn get_user_by_id(&self, id: i64) -> DomainResult<Option<User>>;
}
