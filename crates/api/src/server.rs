//! Process bootstrap shared by both binaries: tracing, database, outbound
//! services and graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use clubhouse_db::DbPool;
use clubhouse_events::{EmailConfig, EmailDelivery};
use clubhouse_storage::{build_storage, ObjectStorage, StorageConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "clubhouse_api=debug,tower_http=debug";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter. `LOG_FORMAT=json` switches the
/// fmt layer to one JSON object per line.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Connect to `DATABASE_URL`, check it and apply migrations.
///
/// # Panics
///
/// Any failure here is fatal at startup.
pub async fn connect_database() -> DbPool {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = clubhouse_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    clubhouse_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    clubhouse_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    pool
}

/// Build the configured object storage backend.
pub async fn connect_storage() -> Arc<dyn ObjectStorage> {
    let config = StorageConfig::from_env();
    build_storage(&config)
        .await
        .expect("Failed to initialise object storage")
}

/// SMTP delivery, or `None` when `SMTP_HOST` is unset.
pub fn build_email() -> Option<Arc<EmailDelivery>> {
    let Some(config) = EmailConfig::from_env() else {
        tracing::info!("SMTP not configured, outbound email disabled");
        return None;
    };
    let host = config.smtp_host.clone();
    let delivery = EmailDelivery::new(config).expect("Invalid SMTP configuration");
    tracing::info!(smtp_host = %host, "Email delivery configured");
    Some(Arc::new(delivery))
}

/// Bind `host:port` and serve `app` until a shutdown signal arrives.
pub async fn serve(app: Router, host: &str, port: u16) {
    let addr = SocketAddr::new(host.parse().expect("Invalid HOST address"), port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
