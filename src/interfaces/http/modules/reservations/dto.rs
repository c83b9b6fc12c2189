//! Reservation DTOs

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::Reservation;
use crate::shared::validations::DATE_FORMAT;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservationRequest {
    /// Calendar date, `YYYY-MM-DD`
    #[validate(length(min = 1, message = "date is required"))]
    pub date: String,
    /// Wall-clock time, `HH:MM`
    #[validate(length(min = 1, message = "time is required"))]
    pub time: String,
    #[validate(range(min = 1, message = "people must be positive"))]
    pub people: i32,
    pub comment: Option<String>,
}

/// `?status=` filter; an empty value means no filter.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatusQuery {
    pub status: Option<String>,
}

impl StatusQuery {
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref().filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReservationResponse {
    pub id: i64,
    pub user_id: i64,
    pub date: String,
    pub time: String,
    pub people: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// pending, confirmed or cancelled
    pub status: String,
    /// RFC 3339
    pub created_at: String,
    pub updated_at: String,
}

impl From<Reservation> for ReservationResponse {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            date: r.date.format(DATE_FORMAT).to_string(),
            time: r.time,
            people: r.people,
            comment: r.comment,
            status: r.status.as_str().to_string(),
            created_at: r.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            updated_at: r.updated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}
