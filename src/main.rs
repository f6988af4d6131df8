//! Tracked Cache - demo server
//!
//! Serves the instrumented cache and the expiring page cache over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tracked_cache::api::{create_router, AppState};
use tracked_cache::cache::{Cache, STORE_OPERATION};
use tracked_cache::config::{Config, StoreBackend};
use tracked_cache::store::{KeyValueStore, MemoryStore, RedisStore};
use tracked_cache::tasks::spawn_cleanup_task;
use tracked_cache::web::{HttpFetcher, PageCache, PageFetcher};

/// Main entry point for the demo server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect the configured store (and start the TTL sweep for memory)
/// 4. Initialize the cache, which flushes the store
/// 5. Serve the router until SIGINT/SIGTERM
/// 6. Log a replay of every `Cache.store` call
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tracked_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tracked Cache server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: backend={:?}, page_ttl={}s, port={}, cleanup_interval={}s",
        config.store_backend, config.page_ttl, config.server_port, config.cleanup_interval
    );

    let (store, cleanup_handle) = match config.store_backend {
        StoreBackend::Memory => {
            let memory = Arc::new(MemoryStore::new());
            let handle = spawn_cleanup_task(memory.clone(), config.cleanup_interval);
            let store: Arc<dyn KeyValueStore> = memory;
            (store, Some(handle))
        }
        StoreBackend::Redis => {
            let redis = RedisStore::connect(&config.redis_url)
                .await
                .with_context(|| format!("failed to connect to {}", config.redis_url))?;
            let store: Arc<dyn KeyValueStore> = Arc::new(redis);
            (store, None)
        }
    };

    let cache = Cache::initialize(store.clone())
        .await
        .context("failed to initialize cache")?;

    let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpFetcher::with_timeout(config.fetch_timeout())?);
    let pages = PageCache::with_ttl(store, fetcher, config.page_ttl());

    let app = create_router(AppState::new(cache.clone(), pages));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await?;

    cache.replay(STORE_OPERATION).await?;
    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the TTL sweep.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }
}
