use std::sync::Arc;

use clubhouse_api::config::ServerConfig;
use clubhouse_api::router::build_app_router;
use clubhouse_api::server;
use clubhouse_api::state::AppState;
use clubhouse_events::{RevalidationClient, RevalidationConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    server::init_tracing();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded admin configuration");

    // --- Database ---
    let pool = server::connect_database().await;

    // --- Outbound services ---
    let storage = server::connect_storage().await;
    let email = server::build_email();
    let revalidation = match RevalidationConfig::from_env() {
        Some(cfg) => {
            tracing::info!(endpoint = %cfg.endpoint(), "Revalidation bridge configured");
            Some(Arc::new(RevalidationClient::new(cfg)))
        }
        None => {
            tracing::info!("SITE_URL/REVALIDATE_SECRET unset, revalidation disabled");
            None
        }
    };

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        storage,
        email,
        revalidation,
    };

    let app = build_app_router(state, &config);
    server::serve(app, &config.host, config.port).await;
}
