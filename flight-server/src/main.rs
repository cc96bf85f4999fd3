use flight_server::cache::PlanCache;
use flight_server::config::ServerConfig;
use flight_server::logging::init_logger;
use flight_server::web::{AppState, create_router};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    init_logger();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    info!(
        memo_scope = %config.search.memo_scope,
        cache_ttl_secs = config.cache.ttl.as_secs(),
        cache_capacity = config.cache.max_capacity,
        search_timeout_secs = config.search_timeout.as_secs(),
        "starting flight planner"
    );

    // Build app state
    let cache = PlanCache::new(&config.cache);
    let state = AppState::new(cache, config.search, config.search_timeout);

    // Create router
    let app = create_router(state);

    // Bind and serve
    let addr = config.http_address;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");

    info!("Flight planner listening on http://{addr}");
    info!("API Endpoints:");
    info!("  GET  /             - Health check");
    info!("  POST /plan         - Plan a trip");
    info!("  GET  /clear_cache  - Clear the response cache");

    axum::serve(listener, app).await.expect("Server error");
}
