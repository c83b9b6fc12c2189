//! Reservation domain entity

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::user::User;
use crate::shared::DomainError;

/// Reservation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservationStatus {
    /// Created by the owner, awaiting moderation
    Pending,
    /// Accepted by an admin
    Confirmed,
    /// Cancelled by the owner or an admin
    Cancelled,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 3] = [Self::Pending, Self::Confirmed, Self::Cancelled];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse an optional status filter as received from a caller.
    pub fn parse_filter(status: Option<&str>) -> Result<Option<Self>, DomainError> {
        status.map(str::parse::<Self>).transpose()
    }
}

impl FromStr for ReservationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(DomainError::InvalidStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Table reservation
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub id: i64,
    /// Owner (immutable after creation)
    pub user_id: i64,
    /// Owner details, populated only by the by-date listing
    pub user: Option<User>,
    pub date: NaiveDate,
    /// Wall-clock time as entered (`HH:MM`)
    pub time: String,
    pub people: i32,
    pub comment: Option<String>,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == ReservationStatus::Cancelled
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_reservation(status: ReservationStatus) -> Reservation {
        let now = Utc::now();
        Reservation {
            id: 1,
            user_id: 7,
            user: None,
            date: NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
            time: "20:00".into(),
            people: 2,
            comment: None,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn status_parses_known_values() {
        for status in ReservationStatus::ALL {
            assert_eq!(status.as_str().parse::<ReservationStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = "weird".parse::<ReservationStatus>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidStatus(s) if s == "weird"));
        // Case matters: the wire values are lowercase only.
        assert!("Pending".parse::<ReservationStatus>().is_err());
    }

    #[test]
    fn filter_parsing() {
        assert_eq!(ReservationStatus::parse_filter(None).unwrap(), None);
        assert_eq!(
            ReservationStatus::parse_filter(Some("confirmed")).unwrap(),
            Some(ReservationStatus::Confirmed)
        );
        assert!(ReservationStatus::parse_filter(Some("")).is_err());
    }

    #[test]
    fn ownership() {
        let r = sample_reservation(ReservationStatus::Pending);
        assert!(r.is_owned_by(7));
        assert!(!r.is_owned_by(8));
        assert!(!r.is_cancelled());
        assert!(sample_reservation(ReservationStatus::Cancelled).is_cancelled());
    }
}
