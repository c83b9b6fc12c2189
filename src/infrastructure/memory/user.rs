use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::{
    CreateUserDto, DomainError, DomainResult, User, UserCredentials, UserRepository,
};

/// DashMap-backed user table with a unique email index
pub struct InMemoryUserRepository {
    users: DashMap<i64, UserCredentials>,
    by_email: DashMap<String, i64>,
    id_counter: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            by_email: DashMap::new(),
            id_counter: AtomicI64::new(1),
        }
    }

    pub(crate) fn find(&self, id: i64) -> Option<User> {
        self.users.get(&id).map(|c| c.user.clone())
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        // Holding the index entry makes check-and-insert atomic per email.
        let slot = match self.by_email.entry(dto.email.clone()) {
            Entry::Occupied(_) => return Err(DomainError::EmailAlreadyExists),
            Entry::Vacant(slot) => slot,
        };

        let id = self.id_counter.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let user = User {
            id,
            name: dto.name,
            email: dto.email,
            is_admin: dto.is_admin,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(
            id,
            UserCredentials {
                user: user.clone(),
                password_hash: dto.password_hash,
            },
        );
        slot.insert(id);
        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<UserCredentials>> {
        let Some(id) = self.by_email.get(email).map(|e| *e.value()) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|c| c.clone()))
    }

    async fn get_user_by_id(&self, id: i64) -> DomainResult<Option<User>> {
        Ok(self.find(id))
    }
}
