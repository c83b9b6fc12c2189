//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    middleware,
    routing::{get, patch, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{AuthService, ReservationService};
use crate::interfaces::http::common::ErrorBody;
use crate::interfaces::http::middleware::{admin_only, auth_middleware, AuthState, USER_ID_HEADER};
use crate::interfaces::http::modules::{
    admin, auth, health, metrics, request_id::request_id_middleware, reservations,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        reservations::list_my_reservations,
        reservations::create_reservation,
        reservations::cancel_reservation,
        admin::list_reservations,
        admin::confirm_reservation,
        admin::cancel_reservation,
    ),
    components(
        schemas(
            ErrorBody,
            health::HealthResponse,
            health::ComponentHealth,
            auth::RegisterRequest,
            auth::LoginRequest,
            auth::UserResponse,
            reservations::CreateReservationRequest,
            reservations::ReservationResponse,
            admin::AdminReservationResponse,
            admin::AdminUserInfo,
        )
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Authentication", description = "Registration and login"),
        (name = "Reservations", description = "The caller's own table reservations (X-User-ID header)"),
        (name = "Admin", description = "Reservation moderation, admin users only"),
    ),
    info(
        title = "Vesuvio Reservations API",
        version = "1.0.0",
        description = "Table reservations with admin moderation"
    )
)]
pub struct ApiDoc;

/// Everything the router needs from the rest of the process.
#[derive(Clone)]
pub struct ApiDependencies {
    pub auth: Arc<AuthService>,
    pub reservations: Arc<ReservationService>,
    /// `None` when running on the in-memory store
    pub db: Option<DatabaseConnection>,
    /// `None` disables `/metrics`
    pub metrics: Option<PrometheusHandle>,
    /// Empty allows any origin
    pub allowed_origins: Vec<String>,
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins = if allowed_origins.is_empty() {
        AllowOrigin::any()
    } else {
        let values: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(values)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(USER_ID_HEADER)])
}

/// Create the API router with all routes
pub fn create_api_router(deps: ApiDependencies) -> Router {
    let auth_state = AuthState {
        auth: deps.auth.clone(),
    };
    let reservation_state = reservations::ReservationState {
        reservations: deps.reservations.clone(),
    };

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .with_state(auth::AuthHandlerState {
            auth: deps.auth.clone(),
        });

    // Caller's own reservations
    let user_routes = Router::new()
        .route("/my/reservations", get(reservations::list_my_reservations))
        .route("/reservations", post(reservations::create_reservation))
        .route(
            "/reservations/{id}/cancel",
            patch(reservations::cancel_reservation),
        )
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ))
        .with_state(reservation_state.clone());

    // Admin moderation; auth runs first, then the admin gate
    let admin_routes = Router::new()
        .route("/reservations", get(admin::list_reservations))
        .route("/reservations/{id}/confirm", patch(admin::confirm_reservation))
        .route("/reservations/{id}/cancel", patch(admin::cancel_reservation))
        .layer(middleware::from_fn(admin_only))
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware))
        .with_state(reservation_state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState {
            db: deps.db,
            started_at: Arc::new(Instant::now()),
        });

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let mut router = Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .nest("/auth", auth_routes)
        .merge(user_routes)
        .nest("/admin", admin_routes);

    if let Some(handle) = deps.metrics {
        router = router.merge(
            Router::new()
                .route("/metrics", get(metrics::prometheus_metrics))
                .with_state(metrics::MetricsState { handle }),
        );
    }

    router
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors_layer(&deps.allowed_origins))
        .layer(TraceLayer::new_for_http())
}
