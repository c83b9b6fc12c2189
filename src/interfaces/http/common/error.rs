//! Error responses
//!
//! Every failure leaves the API as `{"error": "<message>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Error response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// An HTTP status plus the message sent to the client.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, "forbidden")
    }

    /// Map a service error to a response.
    ///
    /// Store and crypto failures are logged and reported as `failure`
    /// so internal details never reach the client.
    pub fn from_domain(err: DomainError, failure: &'static str) -> Self {
        match err {
            DomainError::InvalidInput(_)
            | DomainError::InvalidStatus(_)
            | DomainError::EmailAlreadyExists => Self::bad_request(err.to_string()),
            DomainError::InvalidCredentials => Self::unauthorized("invalid credentials"),
            DomainError::UserNotFound => Self::unauthorized("user not found"),
            DomainError::ReservationNotFound => {
                Self::new(StatusCode::NOT_FOUND, "reservation not found")
            }
            DomainError::ForbiddenReservation => Self::new(
                StatusCode::FORBIDDEN,
                "not allowed to cancel this reservation",
            ),
            DomainError::Unauthorized => Self::forbidden(),
            DomainError::Storage(_) | DomainError::Internal(_) => {
                error!(error = %err, "{}", failure);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, failure)
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Parse a `{id}` path segment; only positive integers are accepted.
pub fn parse_reservation_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::bad_request("invalid reservation id"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_domain_errors() {
        let cases = [
            (DomainError::invalid_input("x"), StatusCode::BAD_REQUEST),
            (DomainError::InvalidStatus("weird".into()), StatusCode::BAD_REQUEST),
            (DomainError::EmailAlreadyExists, StatusCode::BAD_REQUEST),
            (DomainError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (DomainError::ReservationNotFound, StatusCode::NOT_FOUND),
            (DomainError::ForbiddenReservation, StatusCode::FORBIDDEN),
            (DomainError::Unauthorized, StatusCode::FORBIDDEN),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from_domain(err, "failed").status(), status);
        }
    }

    #[test]
    fn internal_details_are_hidden() {
        let err = ApiError::from_domain(
            DomainError::Storage("password authentication failed for user app".into()),
            "failed to create reservation",
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "failed to create reservation");
    }

    #[test]
    fn reservation_id_must_be_positive_integer() {
        assert_eq!(parse_reservation_id("12").unwrap(), 12);
        for raw in ["0", "-3", "abc", "", "1.5"] {
            let err = parse_reservation_id(raw).unwrap_err();
            assert_eq!(err.status(), StatusCode::BAD_REQUEST);
            assert_eq!(err.message(), "invalid reservation id");
        }
    }
}
