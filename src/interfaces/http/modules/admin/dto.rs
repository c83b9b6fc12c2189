//! Admin DTOs

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::Reservation;
use crate::shared::validations::DATE_FORMAT;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminListQuery {
    /// Required, `YYYY-MM-DD`
    #[serde(default)]
    pub date: String,
    pub status: Option<String>,
}

impl AdminListQuery {
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref().filter(|s| !s.is_empty())
    }
}

/// Owner summary embedded in admin listings
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct AdminUserInfo {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminReservationResponse {
    pub id: i64,
    pub user: AdminUserInfo,
    pub date: String,
    pub time: String,
    pub people: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Reservation> for AdminReservationResponse {
    fn from(r: Reservation) -> Self {
        let user = r
            .user
            .map(|u| AdminUserInfo {
                id: u.id,
                name: u.name,
                email: u.email,
            })
            .unwrap_or_else(|| AdminUserInfo {
                id: r.user_id,
                ..AdminUserInfo::default()
            });

        Self {
            id: r.id,
            user,
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
