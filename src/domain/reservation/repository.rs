//! Reservation repository interface

use async_trait::async_trait;
use chrono::NaiveDate;

use super::{CreateReservationDto, Reservation, ReservationStatus};
use crate::shared::DomainResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Insert a new reservation
    async fn create_reservation(&self, dto: CreateReservationDto) -> DomainResult<Reservation>;

    /// Reservations owned by `user_id`, ordered by date then time
    async fn list_by_user(
        &self,
        user_id: i64,
        status: Option<ReservationStatus>,
    ) -> DomainResult<Vec<Reservation>>;

    /// Find reservation by ID
    async fn get_by_id(&self, id: i64) -> DomainResult<Option<Reservation>>;

    /// Set the status of one reservation; `None` if it does not exist
    async fn update_status(
        &self,
        id: i64,
        status: ReservationStatus,
    ) -> DomainResult<Option<Reservation>>;

    /// All reservations on `date` with their owner attached, ordered by time
    async fn list_by_date(
        &self,
        date: NaiveDate,
        status: Option<ReservationStatus>,
    ) -> DomainResult<Vec<Reservation>>;
}
