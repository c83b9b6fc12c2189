//! SeaORM implementation of ReservationRepository

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Select, Set, TransactionTrait,
};
use tracing::debug;

use super::user_repository;
use crate::domain::{
    CreateReservationDto, DomainError, DomainResult, Reservation, ReservationRepository,
    ReservationStatus,
};
use crate::infrastructure::database::entities::{reservation, user};

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: reservation::Model) -> DomainResult<Reservation> {
    let status = m
        .status
        .parse::<ReservationStatus>()
        .map_err(|_| DomainError::Storage(format!("unknown reservation status: {}", m.status)))?;

    Ok(Reservation {
        id: m.id,
        user_id: m.user_id,
        user: None,
        date: m.date,
        time: m.time,
        people: m.people,
        comment: m.comment,
        status,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

fn with_status(
    query: Select<reservation::Entity>,
    status: Option<ReservationStatus>,
) -> Select<reservation::Entity> {
    match status {
        Some(s) => query.filter(reservation::Column::Status.eq(s.as_str())),
        None => query,
    }
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn create_reservation(&self, dto: CreateReservationDto) -> DomainResult<Reservation> {
        debug!("Creating reservation for user {} on {}", dto.user_id, dto.date);

        let now = Utc::now();
        let model = reservation::ActiveModel {
            id: NotSet,
            user_id: Set(dto.user_id),
            date: Set(dto.date),
            time: Set(dto.time),
            people: Set(dto.people),
            comment: Set(dto.comment),
            status: Set(dto.status.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        model_to_domain(model.insert(&self.db).await?)
    }

    async fn list_by_user(
        &self,
        user_id: i64,
        status: Option<ReservationStatus>,
    ) -> DomainResult<Vec<Reservation>> {
        let query = reservation::Entity::find().filter(reservation::Column::UserId.eq(user_id));
        let models = with_status(query, status)
            .order_by_asc(reservation::Column::Date)
            .order_by_asc(reservation::Column::Time)
            .order_by_asc(reservation::Column::Id)
            .all(&self.db)
            .await?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn get_by_id(&self, id: i64) -> DomainResult<Option<Reservation>> {
        reservation::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(model_to_domain)
            .transpose()
    }

    async fn update_status(
        &self,
        id: i64,
        status: ReservationStatus,
    ) -> DomainResult<Option<Reservation>> {
        debug!("Updating reservation {} to {}", id, status);

        let txn = self.db.begin().await?;
        let Some(existing) = reservation::Entity::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let mut active: reservation::ActiveModel = existing.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Utc::now());
        let updated = active.update(&txn).await?;
        txn.commit().await?;

        model_to_domain(updated).map(Some)
    }

    async fn list_by_date(
        &self,
        date: NaiveDate,
        status: Option<ReservationStatus>,
    ) -> DomainResult<Vec<Reservation>> {
        let query = reservation::Entity::find().filter(reservation::Column::Date.eq(date));
        let rows = with_status(query, status)
            .order_by_asc(reservation::Column::Time)
            .order_by_asc(reservation::Column::Id)
            .find_also_related(user::Entity)
            .all(&self.db)
            .await?;

        rows.into_iter()
            .map(|(m, owner)| {
                let mut r = model_to_domain(m)?;
                r.user = owner.map(user_repository::model_to_domain);
                Ok(r)
            })
            .collect()
    }
}
