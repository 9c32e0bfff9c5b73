mod api;
mod middleware;

use std::sync::Arc;

use haven_core::KeywordClassifier;
use haven_discovery::{DiscoveryEngine, EngineConfig, ResourceCache, SystemClock};
use haven_geo::{NominatimClient, NominatimConfig};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = haven_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let geo_config = NominatimConfig {
        timeout_secs: config.geo_timeout_secs,
        user_agent: config.geo_user_agent.clone(),
        max_retries: config.geo_max_retries,
        retry_backoff_base_ms: config.geo_retry_backoff_base_ms,
    };
    let provider = NominatimClient::with_base_url(&geo_config, &config.geo_base_url)?;

    let cache = ResourceCache::new(
        SystemClock,
        chrono::Duration::seconds(i64::try_from(config.category_ttl_secs)?),
        chrono::Duration::seconds(i64::try_from(config.search_ttl_secs)?),
    );
    let engine = Arc::new(DiscoveryEngine::new(
        provider,
        cache,
        Arc::new(KeywordClassifier),
        EngineConfig::from_app_config(&config),
    ));

    let app = build_app(AppState { engine });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "haven-server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
