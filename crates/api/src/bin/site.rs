use std::sync::Arc;
use std::time::Duration;

use clubhouse_api::cache::PageCache;
use clubhouse_api::config::SiteConfig;
use clubhouse_api::router::build_site_router;
use clubhouse_api::server;
use clubhouse_api::state::SiteState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    server::init_tracing();

    let config = SiteConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        cache_ttl_secs = config.page_cache_ttl_secs,
        "Loaded site configuration"
    );
    if config.revalidate_secret.is_none() {
        tracing::warn!("REVALIDATE_SECRET unset, revalidation requests will be rejected");
    }

    let pool = server::connect_database().await;
    let storage = server::connect_storage().await;
    let email = server::build_email();

    let state = SiteState {
        pool,
        config: Arc::new(config.clone()),
        storage,
        email,
        cache: Arc::new(PageCache::new(Duration::from_secs(config.page_cache_ttl_secs))),
    };

    let app = build_site_router(state, &config);
    server::serve(app, &config.host, config.port).await;
}
