//! Admin API handlers
//!
//! Mounted behind `auth_middleware` and `admin_only`; the services
//! re-check the admin flag on confirm and cancel.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};

use super::dto::{AdminListQuery, AdminReservationResponse};
use crate::domain::User;
use crate::interfaces::http::common::error::parse_reservation_id;
use crate::interfaces::http::common::{ApiError, ErrorBody};
use crate::interfaces::http::modules::reservations::{ReservationResponse, ReservationState};

#[utoipa::path(
    get,
    path = "/admin/reservations",
    tag = "Admin",
    params(AdminListQuery, ("X-User-ID" = i64, Header, description = "Admin user id")),
    responses(
        (status = 200, description = "Reservations on the date, ordered by time", body = Vec<AdminReservationResponse>),
        (status = 400, description = "Missing or invalid date, unknown status", body = ErrorBody),
        (status = 403, description = "Caller is not an admin", body = ErrorBody)
    )
)]
pub async fn list_reservations(
    State(state): State<ReservationState>,
    Query(query): Query<AdminListQuery>,
) -> Result<Json<Vec<AdminReservationResponse>>, ApiError> {
    let items = state
        .reservations
        .admin_list_reservations(&query.date, query.status())
        .await
        .map_err(|e| ApiError::from_domain(e, "failed to list reservations"))?;

    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    patch,
    path = "/admin/reservations/{id}/confirm",
    tag = "Admin",
    params(
        ("id" = i64, Path, description = "Reservation id"),
        ("X-User-ID" = i64, Header, description = "Admin user id")
    ),
    responses(
        (status = 200, description = "Reservation confirmed", body = ReservationResponse),
        (status = 400, description = "Invalid reservation id", body = ErrorBody),
        (status = 403, description = "Caller is not an admin", body = ErrorBody),
        (status = 404, description = "Reservation not found", body = ErrorBody)
    )
)]
pub async fn confirm_reservation(
    State(state): State<ReservationState>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
) -> Result<Json<ReservationResponse>, ApiError> {
    let reservation_id = parse_reservation_id(&id)?;
    let reservation = state
        .reservations
        .confirm_reservation(&user, reservation_id)
        .await
        .map_err(|e| ApiError::from_domain(e, "failed to confirm reservation"))?;

    Ok(Json(reservation.into()))
}

#[utoipa::path(
    patch,
    path = "/admin/reservations/{id}/cancel",
    tag = "Admin",
    params(
        ("id" = i64, Path, description = "Reservation id"),
        ("X-User-ID" = i64, Header, description = "Admin user id")
    ),
    responses(
        (status = 200, description = "Reservation cancelled", body = ReservationResponse),
        (status = 400, description = "Invalid reservation id", body = ErrorBody),
        (status = 403, description = "Caller is not an admin", body = ErrorBody),
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
        .admin_cancel_reservation(&user, reservation_id)
        .await
        .map_err(|e| ApiError::from_domain(e, "failed to cancel reservation"))?;

    Ok(Json(reservation.into()))
}
