//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    Set, SqlErr,
};
use tracing::debug;

use crate::domain::{
    CreateUserDto, DomainError, DomainResult, User, UserCredentials, UserRepository,
};
use crate::infrastructure::database::entities::user;

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(super) fn model_to_domain(m: user::Model) -> User {
    User {
        id: m.id,
        name: m.name,
        email: m.email,
        is_admin: m.is_admin,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn model_to_credentials(m: user::Model) -> UserCredentials {
    let password_hash = m.password_hash.clone();
    UserCredentials {
        user: model_to_domain(m),
        password_hash,
    }
}

fn insert_err(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::EmailAlreadyExists,
        _ => e.into(),
    }
}

// ── UserRepository impl ─────────────────────────────────────────

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        debug!("Creating user: {}", dto.email);

        let now = Utc::now();
        let model = user::ActiveModel {
            id: NotSet,
            name: Set(dto.name),
            email: Set(dto.email),
            password_hash: Set(dto.password_hash),
            is_admin: Set(dto.is_admin),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let created = model.insert(&self.db).await.map_err(insert_err)?;
        Ok(model_to_domain(created))
    }

    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<UserCredentials>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_credentials))
    }

    async fn get_user_by_id(&self, id: i64) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(model_to_domain))
    }
}
