use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use logwarden::{
    AppState, build_app,
    config::AppConfig,
    db::DbPool,
    models::UserRef,
    observability,
    retention::{run_log_clean_up, start_log_cleanup_worker},
    services::Services,
};
use tokio_util::sync::CancellationToken;

/// Config file picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG_FILE: &str = "logwarden.toml";

#[derive(Parser, Debug)]
#[command(version, about = "Log retention cleanup service", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to config file (defaults to ./logwarden.toml if it exists,
    /// otherwise built-in defaults)
    #[arg(short, long, global = true)]
    config: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Start the HTTP server and the background cleanup worker (default)
    Serve,
    /// Run a single log cleanup pass and exit
    Cleanup,
    /// Print the unseen error-log alert for a user as JSON and exit
    CheckUnseen {
        /// User to check
        #[arg(short, long)]
        user: String,
    },
    /// Run database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let config = load_config(args.config.as_deref());

    if let Err(e) = observability::init_tracing(&config.observability.logging) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    match args.command {
        Some(Command::Cleanup) => run_cleanup(config).await,
        Some(Command::CheckUnseen { user }) => run_check_unseen(config, user).await,
        Some(Command::Migrate) => run_migrate(config).await,
        Some(Command::Serve) | None => run_server(config).await,
    }
}

fn load_config(explicit_path: Option<&str>) -> AppConfig {
    let path = match explicit_path {
        Some(path) => PathBuf::from(path),
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !path.exists() {
                return AppConfig::default();
            }
            path
        }
    };

    match AppConfig::from_file(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }
}

async fn connect(config: &AppConfig) -> Arc<DbPool> {
    match DbPool::from_config(&config.database).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to database");
            eprintln!("Error: Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run_cleanup(config: AppConfig) {
    let db = connect(&config).await;

    match run_log_clean_up(&db).await {
        Ok(result) => {
            tracing::info!(
                email_queue = result.email_queue_deleted,
                error_logs = result.error_logs_deleted,
                activity_logs = result.activity_logs_deleted,
                total = result.total(),
                "Log cleanup complete"
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Log cleanup failed");
            eprintln!("Error: Log cleanup failed: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run_check_unseen(config: AppConfig, user: String) {
    let db = connect(&config).await;
    let services = Services::new(db, &config.notifier);

    let alert = match services
        .unseen_errors
        .has_unseen_error_log(&UserRef::new(user))
        .await
    {
        Ok(alert) => alert,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&alert) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run_migrate(config: AppConfig) {
    let db = connect(&config).await;

    // from_config already migrated
    if config.database.run_migrations {
        return;
    }

    if let Err(e) = db.run_migrations().await {
        tracing::error!(error = %e, "Database migrations failed");
        eprintln!("Error: Database migrations failed: {}", e);
        std::process::exit(1);
    }
}

async fn run_server(config: AppConfig) {
    if let Err(e) = observability::metrics::init_metrics(&config.observability.metrics) {
        tracing::warn!(error = %e, "Failed to initialize metrics: {e}");
    }

    let db = connect(&config).await;
    let state = AppState::with_db(Arc::clone(&db), config.clone());
    let app = build_app(&config, state);

    let shutdown = CancellationToken::new();
    let worker = tokio::spawn(start_log_cleanup_worker(
        db,
        config.retention.clone(),
        shutdown.clone(),
    ));

    let bind_addr = config.server.bind_addr();
    let listener = match tokio::net::TcpListener::bind(bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("Error: Failed to bind to {}: {}", bind_addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Server listening on http://{}", bind_addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "Server error");
    }

    // Let an in-flight cleanup run finish.
    shutdown.cancel();
    match tokio::time::timeout(config.server.shutdown_timeout(), worker).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!(error = %e, "Log cleanup worker panicked"),
        Err(_) => tracing::warn!("Timeout waiting for log cleanup worker"),
    }

    tracing::info!("Shutdown complete");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
