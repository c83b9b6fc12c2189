use chrono::NaiveDate;

use super::ReservationStatus;

/// Validated input for inserting a reservation.
#[derive(Debug, Clone)]
pub struct CreateReservationDto {
    pub user_id: i64,
    pub date: NaiveDate,
    pub time: String,
    pub people: i32,
    pub comment: Option<String>,
    pub status: ReservationStatus,
}
