//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{LoginRequest, RegisterRequest, UserResponse};
use crate::application::AuthService;
use crate::domain::DomainError;
use crate::interfaces::http::common::{ApiError, ErrorBody, ValidatedJson};

/// Auth state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub auth: Arc<AuthService>,
}

#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Invalid input or email already exists", body = ErrorBody)
    )
)]
pub async fn register(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state
        .auth
        .register(&request.name, &request.email, &request.password)
        .await
        .map_err(|e| ApiError::from_domain(e, "failed to register"))?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = UserResponse),
        (status = 401, description = "Invalid credentials", body = ErrorBody)
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .auth
        .login(&request.email, &request.password)
        .await
        .map_err(|e| match e {
            DomainError::InvalidCredentials | DomainError::InvalidInput(_) => {
                ApiError::unauthorized("invalid credentials")
            }
            other => ApiError::from_domain(other, "failed to login"),
        })?;

    Ok(Json(user.into()))
}
