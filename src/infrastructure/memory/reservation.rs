use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use dashmap::DashMap;

use super::InMemoryUserRepository;
use crate::domain::{
    CreateReservationDto, DomainResult, Reservation, ReservationRepository, ReservationStatus,
};

/// DashMap-backed reservation table.
///
/// Owners are resolved against the shared user table for the by-date listing.
pub struct InMemoryReservationRepository {
    users: Arc<InMemoryUserRepository>,
    reservations: DashMap<i64, Reservation>,
    id_counter: AtomicI64,
}

impl InMemoryReservationRepository {
    pub fn new(users: Arc<InMemoryUserRepository>) -> Self {
        Self {
            users,
            reservations: DashMap::new(),
            id_counter: AtomicI64::new(1),
        }
    }

    fn collect(&self, keep: impl Fn(&Reservation) -> bool) -> Vec<Reservation> {
        self.reservations
            .iter()
            .filter(|e| keep(e.value()))
            .map(|e| e.value().clone())
            .collect()
    }
}

fn status_matches(reservation: &Reservation, status: Option<ReservationStatus>) -> bool {
    status.map_or(true, |s| reservation.status == s)
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn create_reservation(&self, dto: CreateReservationDto) -> DomainResult<Reservation> {
        let id = self.id_counter.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let reservation = Reservation {
            id,
            user_id: dto.user_id,
            user: None,
            date: dto.date,
            time: dto.time,
            people: dto.people,
            comment: dto.comment,
            status: dto.status,
            created_at: now,
            updated_at: now,
        };
        self.reservations.insert(id, reservation.clone());
        Ok(reservation)
    }

    async fn list_by_user(
        &self,
        user_id: i64,
        status: Option<ReservationStatus>,
    ) -> DomainResult<Vec<Reservation>> {
        let mut items = self.collect(|r| r.user_id == user_id && status_matches(r, status));
        items.sort_by(|a, b| (a.date, &a.time, a.id).cmp(&(b.date, &b.time, b.id)));
        Ok(items)
    }

    async fn get_by_id(&self, id: i64) -> DomainResult<Option<Reservation>> {
        Ok(self.reservations.get(&id).map(|r| r.clone()))
    }

    async fn update_status(
        &self,
        id: i64,
        status: ReservationStatus,
    ) -> DomainResult<Option<Reservation>> {
        Ok(self.reservations.get_mut(&id).map(|mut r| {
            r.status = status;
            r.updated_at = Utc::now();
            r.clone()
        }))
    }

    async fn list_by_date(
        &self,
        date: NaiveDate,
        status: Option<ReservationStatus>,
    ) -> DomainResult<Vec<Reservation>> {
        let mut items = self.collect(|r| r.date == date && status_matches(r, status));
        items.sort_by(|a, b| (&a.time, a.id).cmp(&(&b.time, b.id)));
        for item in &mut items {
            item.user = self.users.find(item.user_id);
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CreateUserDto, UserRepository};

    fn dto(user_id: i64, date: (i32, u32, u32), time: &str) -> CreateReservationDto {
        CreateReservationDto {
            user_id,
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            time: time.into(),
            people: 2,
            comment: None,
            status: ReservationStatus::Pending,
        }
    }

    #[tokio::test]
    async fn lists_owner_reservations_in_date_time_order() {
        let repo = InMemoryReservationRepository::new(Arc::new(InMemoryUserRepository::new()));
        repo.create_reservation(dto(1, (2025, 12, 2), "19:00")).await.unwrap();
        repo.create_reservation(dto(1, (2025, 12, 1), "21:00")).await.unwrap();
        repo.create_reservation(dto(1, (2025, 12, 1), "18:30")).await.unwrap();
        repo.create_reservation(dto(2, (2025, 12, 1), "12:00")).await.unwrap();

        let items = repo.list_by_user(1, None).await.unwrap();
        let times: Vec<_> = items.iter().map(|r| r.time.as_str()).collect();
        assert_eq!(times, ["18:30", "21:00", "19:00"]);
    }

    #[tokio::test]
    async fn update_status_of_missing_row_is_none() {
        let repo = InMemoryReservationRepository::new(Arc::new(InMemoryUserRepository::new()));
        let updated = repo
            .update_status(42, ReservationStatus::Confirmed)
            .await
            .unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn by_date_listing_attaches_owner_and_filters_status() {
        let users = Arc::new(InMemoryUserRepository::new());
        let owner = users
            .create_user(CreateUserDto {
                name: "Bob".into(),
                email: "bob@example.com".into(),
                password_hash: "hash".into(),
                is_admin: false,
            })
            .await
            .unwrap();
        let repo = InMemoryReservationRepository::new(users);
        let first = repo
            .create_reservation(dto(owner.id, (2025, 12, 1), "20:00"))
            .await
            .unwrap();
        repo.create_reservation(dto(owner.id, (2025, 12, 1), "19:00"))
            .await
            .unwrap();
        repo.update_status(first.id, ReservationStatus::Confirmed)
            .await
            .unwrap();

        let date = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        let all = repo.list_by_date(date, None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].time, "19:00");
        assert_eq!(all[0].user.as_ref().map(|u| u.email.as_str()), Some("bob@example.com"));

        let confirmed = repo
            .list_by_date(date, Some(ReservationStatus::Confirmed))
            .await
            .unwrap();
        assert_eq!(confirmed.len(), 1);
        assert_eq!(confirmed[0].id, first.id);
    }
}
