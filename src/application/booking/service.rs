//! Reservation service: lifecycle, ownership and admin moderation
//!
//! Status moves `pending` → `confirmed` / `cancelled`. Owners may cancel
//! their own reservations; only admins confirm or cancel on behalf of others.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{
    CreateReservationDto, DomainError, DomainResult, Reservation, ReservationRepository,
    ReservationStatus, User,
};
use crate::shared::validations::{is_missing_id, parse_date};

pub struct ReservationService {
    repo: Arc<dyn ReservationRepository>,
}

impl ReservationService {
    pub fn new(repo: Arc<dyn ReservationRepository>) -> Self {
        Self { repo }
    }

    // ── Owner operations ────────────────────────────────────────

    /// Book a table for `user_id`; new reservations start as `pending`.
    pub async fn create_reservation(
        &self,
        user_id: i64,
        date: &str,
        time: &str,
        people: i32,
        comment: Option<String>,
    ) -> DomainResult<Reservation> {
        if is_missing_id(user_id) {
            return Err(DomainError::invalid_input("user id is required"));
        }
        if people <= 0 {
            return Err(DomainError::invalid_input("people must be positive"));
        }
        let time = time.trim();
        if time.is_empty() {
            return Err(DomainError::invalid_input("time is required"));
        }
        let date = parse_date(date)
            .ok_or_else(|| DomainError::invalid_input("date must be YYYY-MM-DD"))?;
        let comment = comment
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        let reservation = self
            .repo
            .create_reservation(CreateReservationDto {
                user_id,
                date,
                time: time.to_string(),
                people,
                comment,
                status: ReservationStatus::Pending,
            })
            .await?;

        metrics::counter!("reservations_created_total").increment(1);
        info!(
            reservation_id = reservation.id,
            user_id,
            date = %reservation.date,
            time = %reservation.time,
            people,
            "Reservation created"
        );
        Ok(reservation)
    }

    /// The owner's reservations ordered by date and time.
    pub async fn list_user_reservations(
        &self,
        user_id: i64,
        status: Option<&str>,
    ) -> DomainResult<Vec<Reservation>> {
        if is_missing_id(user_id) {
            return Err(DomainError::invalid_input("user id is required"));
        }
        let status = ReservationStatus::parse_filter(status)?;
        self.repo.list_by_user(user_id, status).await
    }

    /// Cancel one of the caller's own reservations.
    ///
    /// Cancelling an already cancelled reservation returns it unchanged
    /// without touching the store.
    pub async fn cancel_reservation(
        &self,
        user_id: i64,
        reservation_id: i64,
    ) -> DomainResult<Reservation> {
        if is_missing_id(user_id) || is_missing_id(reservation_id) {
            return Err(DomainError::invalid_input(
                "user id and reservation id are required",
            ));
        }

        let reservation = self
            .repo
            .get_by_id(reservation_id)
            .await?
            .ok_or(DomainError::ReservationNotFound)?;

        if !reservation.is_owned_by(user_id) {
            return Err(DomainError::ForbiddenReservation);
        }
        if reservation.is_cancelled() {
            debug!(reservation_id, "Reservation already cancelled");
            return Ok(reservation);
        }

        self.transition(reservation_id, ReservationStatus::Cancelled, user_id)
            .await
    }

    // ── Admin operations ────────────────────────────────────────

    /// Every reservation on `date`, with its owner attached, ordered by time.
    pub async fn admin_list_reservations(
        &self,
        date: &str,
        status: Option<&str>,
    ) -> DomainResult<Vec<Reservation>> {
        if date.trim().is_empty() {
            return Err(DomainError::invalid_input("date is required"));
        }
        let status = ReservationStatus::parse_filter(status)?;
        let date = parse_date(date)
            .ok_or_else(|| DomainError::invalid_input("date must be YYYY-MM-DD"))?;
        self.repo.list_by_date(date, status).await
    }

    pub async fn confirm_reservation(
        &self,
        acting_user: &User,
        reservation_id: i64,
    ) -> DomainResult<Reservation> {
        self.moderate(acting_user, reservation_id, ReservationStatus::Confirmed)
            .await
    }

    pub async fn admin_cancel_reservation(
        &self,
        acting_user: &User,
        reservation_id: i64,
    ) -> DomainResult<Reservation> {
        self.moderate(acting_user, reservation_id, ReservationStatus::Cancelled)
            .await
    }

    // ── Helpers ─────────────────────────────────────────────────

    /// Admin status change. Always writes, whatever the current status.
    async fn moderate(
        &self,
        acting_user: &User,
        reservation_id: i64,
        status: ReservationStatus,
    ) -> DomainResult<Reservation> {
        if !acting_user.is_admin {
            return Err(DomainError::Unauthorized);
        }
        if is_missing_id(reservation_id) {
            return Err(DomainError::invalid_input("reservation id is required"));
        }

        self.repo
            .get_by_id(reservation_id)
            .await?
            .ok_or(DomainError::ReservationNotFound)?;

        self.transition(reservation_id, status, acting_user.id).await
    }

    async fn transition(
        &self,
        reservation_id: i64,
        status: ReservationStatus,
        acting_user_id: i64,
    ) -> DomainResult<Reservation> {
        // The row may vanish between lookup and update.
        let updated = self
            .repo
            .update_status(reservation_id, status)
            .await?
            .ok_or(DomainError::ReservationNotFound)?;

        metrics::counter!("reservation_status_changes_total", "status" => status.as_str())
            .increment(1);
        info!(
            reservation_id,
            acting_user_id,
            status = %status,
            "Reservation status changed"
        );
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::{NaiveDate, Utc};

    use super::*;
    use crate::domain::{CreateUserDto, UserRepository};
    use crate::infrastructure::memory::{InMemoryReservationRepository, InMemoryUserRepository};

    /// In-memory store that records how often each method is hit.
    struct CountingRepository {
        inner: InMemoryReservationRepository,
        lookups: AtomicUsize,
        writes: AtomicUsize,
        fail_writes: bool,
    }

    impl CountingRepository {
        fn new(users: Arc<InMemoryUserRepository>) -> Self {
            Self {
                inner: InMemoryReservationRepository::new(users),
                lookups: AtomicUsize::new(0),
                writes: AtomicUsize::new(0),
                fail_writes: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail_writes: true,
                ..Self::new(Arc::new(InMemoryUserRepository::new()))
            }
        }

        fn lookups(&self) -> usize {
            self.lookups.load(Ordering::SeqCst)
        }

        fn writes(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ReservationRepository for CountingRepository {
        async fn create_reservation(&self, dto: CreateReservationDto) -> DomainResult<Reservation> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            if self.fail_writes {
                return Err(DomainError::Storage("disk full".into()));
            }
            self.inner.create_reservation(dto).await
        }

        async fn list_by_user(
            &self,
            user_id: i64,
            status: Option<ReservationStatus>,
        ) -> DomainResult<Vec<Reservation>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.list_by_user(user_id, status).await
        }

        async fn get_by_id(&self, id: i64) -> DomainResult<Option<Reservation>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.get_by_id(id).await
        }

        async fn update_status(
            &self,
            id: i64,
            status: ReservationStatus,
        ) -> DomainResult<Option<Reservation>> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.update_status(id, status).await
        }

        async fn list_by_date(
            &self,
            date: NaiveDate,
            status: Option<ReservationStatus>,
        ) -> DomainResult<Vec<Reservation>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.list_by_date(date, status).await
        }
    }

    struct Fixture {
        users: Arc<InMemoryUserRepository>,
        repo: Arc<CountingRepository>,
        service: ReservationService,
    }

    fn fixture() -> Fixture {
        let users = Arc::new(InMemoryUserRepository::new());
        let repo = Arc::new(CountingRepository::new(users.clone()));
        let service = ReservationService::new(repo.clone());
        Fixture {
            users,
            repo,
            service,
        }
    }

    async fn user(users: &InMemoryUserRepository, email: &str, is_admin: bool) -> User {
        users
            .create_user(CreateUserDto {
                name: email.split('@').next().unwrap_or_default().to_string(),
                email: email.into(),
                password_hash: "hash".into(),
                is_admin,
            })
            .await
            .unwrap()
    }

    fn plain_user(id: i64, is_admin: bool) -> User {
        let now = Utc::now();
        User {
            id,
            name: "someone".into(),
            email: format!("user{id}@example.com"),
            is_admin,
            created_at: now,
            updated_at: now,
        }
    }

    // ── create ──────────────────────────────────────────────────

    #[tokio::test]
    async fn create_starts_pending() {
        let f = fixture();
        let r = f
            .service
            .create_reservation(1, "2025-12-01", "20:00", 2, Some("window seat".into()))
            .await
            .unwrap();

        assert_eq!(r.status, ReservationStatus::Pending);
        assert_eq!(r.user_id, 1);
        assert_eq!(r.date, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        assert_eq!(r.comment.as_deref(), Some("window seat"));
    }

    #[tokio::test]
    async fn non_positive_people_is_always_invalid() {
        let f = fixture();
        for people in [0, -1, i32::MIN] {
            for (date, time) in [("2025-12-01", "20:00"), ("bad", ""), ("", "20:00")] {
                let err = f
                    .service
                    .create_reservation(1, date, time, people, None)
                    .await
                    .unwrap_err();
                assert!(matches!(err, DomainError::InvalidInput(_)));
            }
        }
        assert_eq!(f.repo.writes(), 0);
    }

    #[tokio::test]
    async fn create_validates_remaining_fields() {
        let f = fixture();
        let cases = [
            (0, "2025-12-01", "20:00"),
            (1, "2025-12-01", "   "),
            (1, "01.12.2025", "20:00"),
            (1, "2025-13-40", "20:00"),
        ];
        for (user_id, date, time) in cases {
            let err = f
                .service
                .create_reservation(user_id, date, time, 2, None)
                .await
                .unwrap_err();
            assert!(matches!(err, DomainError::InvalidInput(_)), "{date} {time}");
        }
    }

    #[tokio::test]
    async fn blank_comment_is_dropped() {
        let f = fixture();
        let r = f
            .service
            .create_reservation(1, "2025-12-01", " 19:30 ", 4, Some("  ".into()))
            .await
            .unwrap();
        assert_eq!(r.comment, None);
        assert_eq!(r.time, "19:30");
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_storage() {
        let service = ReservationService::new(Arc::new(CountingRepository::failing()));
        let err = service
            .create_reservation(1, "2025-12-01", "20:00", 2, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Storage(_)));
    }

    // ── owner listing and cancel ────────────────────────────────

    #[tokio::test]
    async fn list_rejects_unknown_status() {
        let f = fixture();
        let err = f
            .service
            .list_user_reservations(1, Some("weird"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidStatus(_)));

        let err = f.service.list_user_reservations(0, None).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn list_filters_by_status() {
        let f = fixture();
        let a = f
            .service
            .create_reservation(1, "2025-12-01", "20:00", 2, None)
            .await
            .unwrap();
        f.service
            .create_reservation(1, "2025-12-02", "20:00", 2, None)
            .await
            .unwrap();
        f.service.cancel_reservation(1, a.id).await.unwrap();

        let cancelled = f
            .service
            .list_user_reservations(1, Some("cancelled"))
            .await
            .unwrap();
        assert_eq!(cancelled.len(), 1);
        assert_eq!(cancelled[0].id, a.id);
        assert_eq!(f.service.list_user_reservations(1, None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn cancel_twice_writes_once() {
        let f = fixture();
        let r = f
            .service
            .create_reservation(1, "2025-12-01", "20:00", 2, None)
            .await
            .unwrap();
        let writes_before = f.repo.writes();

        let first = f.service.cancel_reservation(1, r.id).await.unwrap();
        let second = f.service.cancel_reservation(1, r.id).await.unwrap();

        assert_eq!(first.status, ReservationStatus::Cancelled);
        assert_eq!(second.status, ReservationStatus::Cancelled);
        assert_eq!(first.updated_at, second.updated_at);
        assert_eq!(f.repo.writes() - writes_before, 1);
    }

    #[tokio::test]
    async fn cancel_foreign_reservation_is_forbidden() {
        let f = fixture();
        let r = f
            .service
            .create_reservation(2, "2025-12-01", "20:00", 2, None)
            .await
            .unwrap();

        let err = f.service.cancel_reservation(1, r.id).await.unwrap_err();
        assert!(matches!(err, DomainError::ForbiddenReservation));

        let err = f.service.cancel_reservation(1, r.id + 100).await.unwrap_err();
        assert!(matches!(err, DomainError::ReservationNotFound));

        let err = f.service.cancel_reservation(1, 0).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    // ── admin ───────────────────────────────────────────────────

    #[tokio::test]
    async fn non_admin_is_rejected_before_store_access() {
        let f = fixture();
        let outsider = plain_user(5, false);

        let err = f
            .service
            .confirm_reservation(&outsider, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized));
        let err = f
            .service
            .admin_cancel_reservation(&outsider, 0)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized));

        assert_eq!(f.repo.lookups(), 0);
        assert_eq!(f.repo.writes(), 0);
    }

    #[tokio::test]
    async fn admin_moderation_validates_id_and_existence() {
        let f = fixture();
        let admin = plain_user(1, true);

        let err = f.service.confirm_reservation(&admin, 0).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
        let err = f.service.confirm_reservation(&admin, 42).await.unwrap_err();
        assert!(matches!(err, DomainError::ReservationNotFound));
        assert_eq!(f.repo.writes(), 0);
    }

    #[tokio::test]
    async fn admin_list_validation_order() {
        let f = fixture();

        let err = f.service.admin_list_reservations("", None).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));

        let err = f
            .service
            .admin_list_reservations("2025-13-40", None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));

        // Status is checked before the date is parsed.
        let err = f
            .service
            .admin_list_reservations("not-a-date", Some("weird"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidStatus(_)));
    }

    #[tokio::test]
    async fn admin_list_attaches_owner_in_time_order() {
        let f = fixture();
        let alice = user(&f.users, "alice@example.com", false).await;
        let bob = user(&f.users, "bob@example.com", false).await;
        f.service
            .create_reservation(alice.id, "2025-12-01", "21:00", 2, None)
            .await
            .unwrap();
        f.service
            .create_reservation(bob.id, "2025-12-01", "18:00", 3, None)
            .await
            .unwrap();
        f.service
            .create_reservation(bob.id, "2025-12-02", "18:00", 3, None)
            .await
            .unwrap();

        let items = f
            .service
            .admin_list_reservations("2025-12-01", None)
            .await
            .unwrap();
        let owners: Vec<_> = items
            .iter()
            .map(|r| r.user.as_ref().map(|u| u.email.clone()))
            .collect();
        assert_eq!(
            owners,
            [
                Some("bob@example.com".to_string()),
                Some("alice@example.com".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn full_lifecycle() {
        let f = fixture();
        let owner = user(&f.users, "guest@example.com", false).await;
        let admin = user(&f.users, "admin@example.com", true).await;

        let r = f
            .service
            .create_reservation(owner.id, "2025-12-01", "20:00", 2, None)
            .await
            .unwrap();
        assert_eq!(r.status, ReservationStatus::Pending);

        let confirmed = f.service.confirm_reservation(&admin, r.id).await.unwrap();
        assert_eq!(confirmed.status, ReservationStatus::Confirmed);

        let cancelled = f
            .service
            .admin_cancel_reservation(&admin, r.id)
            .await
            .unwrap();
        assert_eq!(cancelled.status, ReservationStatus::Cancelled);

        let writes = f.repo.writes();
        let again = f.service.cancel_reservation(owner.id, r.id).await.unwrap();
        assert_eq!(again.status, ReservationStatus::Cancelled);
        assert_eq!(again.updated_at, cancelled.updated_at);
        assert_eq!(f.repo.writes(), writes);
    }

    #[tokio::test]
    async fn admin_confirm_writes_even_when_cancelled() {
        let f = fixture();
        let admin = plain_user(1, true);
        let r = f
            .service
            .create_reservation(2, "2025-12-01", "20:00", 2, None)
            .await
            .unwrap();
        f.service.cancel_reservation(2, r.id).await.unwrap();

        let confirmed = f.service.confirm_reservation(&admin, r.id).await.unwrap();
        assert_eq!(confirmed.status, ReservationStatus::Confirmed);
    }

    #[tokio::test]
    async fn admin_cancel_writes_even_when_cancelled() {
        let f = fixture();
        let admin = plain_user(1, true);
        let r = f
            .service
            .create_reservation(2, "2025-12-01", "20:00", 2, None)
            .await
            .unwrap();
        let cancelled = f.service.cancel_reservation(2, r.id).await.unwrap();
        let writes_before = f.repo.writes();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let again = f
            .service
            .admin_cancel_reservation(&admin, r.id)
            .await
            .unwrap();

        assert_eq!(again.status, ReservationStatus::Cancelled);
        assert_eq!(f.repo.writes() - writes_before, 1);
        assert!(again.updated_at > cancelled.updated_at);
    }
}
