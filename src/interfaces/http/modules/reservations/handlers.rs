//! Reservation API handlers (authenticated caller)

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{CreateReservationRequest, ReservationResponse, StatusQuery};
use crate::application::ReservationService;
use crate::domain::User;
use crate::interfaces::http::common::error::parse_reservation_id;
use crate::interfaces::http::common::{ApiError, ErrorBody, ValidatedJson};

/// Shared by the owner and admin reservation routes
#[derive(Clone)]
pub struct ReservationState {
    pub reservations: Arc<ReservationService>,
}

#[utoipa::path(
    get,
    path = "/my/reservations",
    tag = "Reservations",
    params(StatusQuery, ("X-User-ID" = i64, Header, description = "Caller's user id")),
    responses(
        (status = 200, description = "Caller's reservations ordered by date and time", body = Vec<ReservationResponse>),
        (status = 400, description = "Unknown status", body = ErrorBody),
        (status = 401, description = "Not authenticated", body = ErrorBody)
    )
)]
pub async fn list_my_reservations(
    State(state): State<ReservationState>,
    Extension(user): Extension<User>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Vec<ReservationResponse>>, ApiError> {
    let items = state
        .reservations
        .list_user_reservations(user.id, query.status())
        .await
        .map_err(|e| ApiError::from_domain(e, "failed to list reservations"))?;

    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/reservations",
    tag = "Reservations",
    request_body = CreateReservationRequest,
    params(("X-User-ID" = i64, Header, description = "Caller's user id")),
    responses(
        (status = 201, description = "Reservation created as pending", body = ReservationResponse),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 401, description = "Not authenticated", body = ErrorBody)
    )
)]
pub async fn create_reservation(
    State(state): State<ReservationState>,
    Extension(user): Extension<User>,
    ValidatedJson(request): ValidatedJson<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ReservationResponse>), ApiError> {
    let reservation = state
        .reservations
        .create_reservation(
            user.id,
            &request.date,
            &request.time,
            request.people,
            request.comment,
        )
        .await
        .map_err(|e| ApiError::from_domain(e, "failed to create reservation"))?;

    Ok((StatusCode::CREATED, Json(reservation.into())))
}

#[utoipa::path(
    patch,
    path = "/reservations/{id}/cancel",
    tag = "Reservations",
    params(
        ("id" = i64, Path, description = "Reservation id"),
        ("X-User-ID" = i64, Header, description = "Caller's user id")
    ),
    responses(
        (status = 200, description = "Reservation cancelled", body = ReservationResponse),
        (status = 400, description = "Invalid reservation id", body = ErrorBody),
        (status = 403, description = "Reservation belongs to someone else", body = ErrorBody),
        (status = 404, description = "Reservation not found", body = ErrorBody)
    )
)]
pub async fn cancel_reservation(
    State(state): State<ReservationState>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
) -> Result<Json<ReservationResponse>, ApiError> {
    let reservation_id = parse_reservation_id(&id)?;
    let reservation = state
        .reservations
        .cancel_reservation(user.id, reservation_id)
        .await
        .map_err(|e| ApiError::from_domain(e, "failed to cancel reservation"))?;

    Ok(Json(reservation.into()))
}
