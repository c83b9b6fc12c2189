//! Reusable reservation server runtime.
//!
//! Provides [`ServerHandle`] that encapsulates the full server lifecycle:
//! database init, migrations, user seeding, REST API, metrics and
//! graceful shutdown. The CLI binary is a thin wrapper around it.

use std::sync::{Arc, OnceLock};

use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::{ConnectionTrait, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::application::{seed_users, AuthService, ReservationService};
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::PasswordHasher;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::database::ping;
use crate::infrastructure::{
    init_database, DatabaseConfig, InMemoryRepositoryProvider, SeaOrmRepositoryProvider,
};
use crate::interfaces::http::modules::metrics::install_recorder;
use crate::interfaces::http::{create_api_router, ApiDependencies};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the reservation server.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Create the `[seed]` users that do not exist yet (default: true).
    pub seed_users: bool,
    /// Use the in-memory store instead of the database (default: false).
    pub in_memory: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            seed_users: true,
            in_memory: false,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running reservation server.
///
/// ```rust,no_run
/// use vesuvio::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Repository provider for data access.
    pub repos: Arc<dyn RepositoryProvider>,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Port the API is listening on.
    pub port: u16,

    db: Option<DatabaseConnection>,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the server.
    ///
    /// This will:
    /// 1. Install the Prometheus metrics recorder
    /// 2. Connect to the database and run migrations (unless in-memory)
    /// 3. Seed the configured users
    /// 4. Start the REST API server (with Swagger UI)
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        app_cfg.validate()?;

        info!("Starting Vesuvio reservation service...");

        let prometheus_handle = prometheus_handle();

        // ── Storage ────────────────────────────────────────────
        let (db, repos): (Option<DatabaseConnection>, Arc<dyn RepositoryProvider>) =
            if opts.in_memory {
                warn!("Using the in-memory store; data is lost on shutdown");
                (None, Arc::new(InMemoryRepositoryProvider::new()))
            } else {
                let db = connect(&app_cfg, opts.auto_migrate).await?;
                let repos = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
                (Some(db), repos)
            };

        let hasher = PasswordHasher::default();
        if opts.seed_users && !app_cfg.seed.users.is_empty() {
            let created =
                seed_users(repos.users().as_ref(), &hasher, &app_cfg.seed.users).await?;
            info!(created, "Seed users processed");
        }

        // ── Services ───────────────────────────────────────────
        let auth = Arc::new(AuthService::with_hasher(repos.users(), hasher));
        let reservations = Arc::new(ReservationService::new(repos.reservations()));

        // ── Shutdown coordinator ───────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        // ── REST API server ────────────────────────────────────
        let api_router = create_api_router(ApiDependencies {
            auth,
            reservations,
            db: db.clone(),
            metrics: prometheus_handle,
            allowed_origins: app_cfg.cors.allowed_origins.clone(),
        });

        let api_addr = app_cfg.server.address();
        let listener = tokio::net::TcpListener::bind(&api_addr).await?;
        let port = listener.local_addr()?.port();
        info!("REST API server listening on http://{}", api_addr);
        info!("Swagger UI available at http://{}/docs/", api_addr);

        let api_shutdown = shutdown_signal.clone();
        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            repos,
            config: app_cfg,
            port,
            db,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to stop after shutdown has been triggered.
    ///
    /// In-flight requests get `server.shutdown_timeout` seconds to finish.
    pub async fn wait(self) {
        info!("Waiting for server tasks to complete...");

        match tokio::time::timeout(self.shutdown.timeout(), self.api_task).await {
            Ok(Ok(())) => info!("REST API server stopped"),
            Ok(Err(e)) => error!("REST API server task panicked: {}", e),
            Err(_) => warn!("Shutdown timeout elapsed with requests still in flight"),
        }

        if let Some(db) = self.db {
            match db.close().await {
                Ok(()) => info!("Database connection closed"),
                Err(e) => warn!("Error closing database connection: {}", e),
            }
        }

        info!("Vesuvio shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down reservation service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// The global recorder can only be installed once per process; restarts reuse it.
fn prometheus_handle() -> Option<PrometheusHandle> {
    static PROM_HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();

    PROM_HANDLE
        .get_or_init(|| match install_recorder() {
            Ok(handle) => {
                info!("Prometheus metrics recorder installed");
                Some(handle)
            }
            Err(e) => {
                warn!("Metrics disabled, failed to install recorder: {}", e);
                None
            }
        })
        .clone()
}

async fn connect(
    app_cfg: &AppConfig,
    auto_migrate: bool,
) -> Result<DatabaseConnection, sea_orm::DbErr> {
    let db = init_database(&DatabaseConfig::from(&app_cfg.database)).await?;
    if auto_migrate {
        info!("Running database migrations...");
        Migrator::up(&db, None).await?;
        info!("Migrations completed");
    }
    Ok(db)
}

/// Migrate the database and create the configured seed users.
///
/// Returns the number of users created.
pub async fn run_seed(app_cfg: &AppConfig) -> Result<usize, Box<dyn std::error::Error>> {
    if app_cfg.seed.users.is_empty() {
        return Err("no seed users configured; set [seed] in the config file \
                    or ADMIN_EMAIL/ADMIN_PASSWORD and USER_EMAIL/USER_PASSWORD"
            .into());
    }

    let db = connect(app_cfg, true).await?;
    let repos = SeaOrmRepositoryProvider::new(db.clone());
    let created = seed_users(
        repos.users().as_ref(),
        &PasswordHasher::default(),
        &app_cfg.seed.users,
    )
    .await?;
    db.close().await?;
    Ok(created)
}

/// Connect and run `SELECT 1`; returns the backend name.
pub async fn check_database(app_cfg: &AppConfig) -> Result<String, sea_orm::DbErr> {
    let db = init_database(&DatabaseConfig::from(&app_cfg.database)).await?;
    ping(&db).await?;
    let backend = format!("{:?}", db.get_database_backend());
    db.close().await?;
    Ok(backend)
}

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
/// `RUST_LOG` takes precedence over `logging.level`.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
