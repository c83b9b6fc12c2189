//! Authentication middleware for Axum
//!
//! Callers identify themselves with an `X-User-ID` header. The user is
//! resolved on every request and stored in request extensions, where
//! handlers pick it up with `Extension<User>`.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::application::AuthService;
use crate::domain::User;
use crate::interfaces::http::common::ApiError;

/// Header carrying the caller's user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Authentication state
#[derive(Clone)]
pub struct AuthState {
    pub auth: Arc<AuthService>,
}

/// Authentication error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    MissingUserId,
    InvalidUserId,
    UserNotFound,
    NotAuthenticated,
    NotAdmin,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let err = match self {
            Self::MissingUserId => ApiError::unauthorized("missing X-User-ID"),
            Self::InvalidUserId => ApiError::unauthorized("invalid X-User-ID"),
            Self::UserNotFound => ApiError::unauthorized("user not found"),
            Self::NotAuthenticated => ApiError::unauthorized("unauthorized"),
            Self::NotAdmin => ApiError::forbidden(),
        };
        err.into_response()
    }
}

fn parse_user_id(raw: &str) -> Result<i64, AuthError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or(AuthError::InvalidUserId)
}

/// Resolve `X-User-ID` to a [`User`] or reject with 401.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(header) = request.headers().get(USER_ID_HEADER) else {
        return AuthError::MissingUserId.into_response();
    };
    let user_id = match header.to_str().map_err(|_| AuthError::InvalidUserId) {
        Ok(raw) if raw.is_empty() => return AuthError::MissingUserId.into_response(),
        Ok(raw) => match parse_user_id(raw) {
            Ok(id) => id,
            Err(e) => return e.into_response(),
        },
        Err(e) => return e.into_response(),
    };

    match state.auth.get_user_by_id(user_id).await {
        Ok(user) => {
            debug!(user_id = user.id, is_admin = user.is_admin, "Request authenticated");
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => {
            warn!(user_id, error = %e, "Rejected request for unknown user");
            AuthError::UserNotFound.into_response()
        }
    }
}

/// Gate for admin routes; must run after [`auth_middleware`].
pub async fn admin_only(request: Request<Body>, next: Next) -> Response {
    let Some(user) = request.extensions().get::<User>() else {
        return AuthError::NotAuthenticated.into_response();
    };
    if !user.is_admin {
        warn!(user_id = user.id, "Non-admin access to admin route");
        return AuthError::NotAdmin.into_response();
    }
    next.run(request).await
}
