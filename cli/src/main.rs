//! Vesuvio CLI server
//!
//! Headless restaurant reservation backend, suitable for running as a
//! systemd service, Docker container, or standalone process.
//!
//! ```sh
//! # Run with default config (~/.config/vesuvio/config.toml)
//! vesuvio
//!
//! # Custom config path and port
//! vesuvio --config /etc/vesuvio/config.toml --port 9090
//!
//! # Create seed users and exit
//! ADMIN_EMAIL=admin@example.com ADMIN_PASSWORD=secret vesuvio --seed
//!
//! # Validate config without starting
//! vesuvio --check
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use vesuvio::config::AppConfig;
use vesuvio::server::{check_database, init_tracing, run_seed, ServerHandle, ServerOptions};

/// Vesuvio: table reservations for a single restaurant.
#[derive(Parser, Debug)]
#[command(
    name = "vesuvio",
    version,
    about = "Restaurant reservation backend",
    long_about = "Vesuvio REST API server for customer bookings and \
                  staff moderation of table reservations.\n\n\
                  Default config: ~/.config/vesuvio/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "VESUVIO_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Connect to the database, run `SELECT 1` and exit.
    #[arg(long)]
    check_db: bool,

    /// Run migrations, create the configured seed users and exit.
    #[arg(long)]
    seed: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Keep all data in memory instead of the database.
    #[arg(long)]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.clone().unwrap_or_else(vesuvio::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = config.apply_env() {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    if let Err(e) = config.validate() {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.server.address());
        println!("   Database    : {}", config.database.redacted_url());
        println!("   Log level   : {}", config.logging.level);
        println!("   Seed users  : {}", config.seed.users.len());
        return ExitCode::SUCCESS;
    }

    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    if cli.check_db {
        return match check_database(&config).await {
            Ok(backend) => {
                info!(backend = %backend, "Database reachable at {}", config.database.redacted_url());
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("Database check failed: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    if cli.seed {
        return match run_seed(&config).await {
            Ok(created) => {
                info!(created, "Seeding finished");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("Seeding failed: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    // ── Start server ───────────────────────────────────────────
    let handle = match ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        seed_users: true,
        in_memory: cli.in_memory,
    })
    .await
    {
        Ok(handle) => handle,
        Err(e) => {
            error!("Failed to start server: {}", e);
            return ExitCode::FAILURE;
        }
    };

    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    ExitCode::SUCCESS
}
