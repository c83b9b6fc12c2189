use thiserror::Error;

/// Error kinds surfaced by the services to the HTTP boundary.
///
/// Every variant except `Storage` and `Internal` is a local, non-retryable
/// validation or authorization outcome. `Storage` carries the store's own
/// message for logging only; the boundary never returns it to clients.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid status: {0}")]
    InvalidStatus(String),

    #[error("email already exists")]
    EmailAlreadyExists,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("user not found")]
    UserNotFound,

    #[error("reservation not found")]
    ReservationNotFound,

    /// Acting principal lacks the admin role.
    #[error("unauthorized")]
    Unauthorized,

    /// Acting principal is not the reservation owner.
    #[error("user cannot modify this reservation")]
    ForbiddenReservation,

    #[error("storage failure: {0}")]
    Storage(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::Storage(e.to_string())
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
