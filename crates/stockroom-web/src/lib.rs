//! Stockroom Web Server
//!
//! Axum-based REST API for the inventory tracker, plus the server-sent
//! event stream that keeps dashboards live.

pub mod auth;
pub mod config;
pub mod cors;
pub mod error;
pub mod events;
pub mod extract;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use stockroom_core::{MemoryStore, StaticIdentityProvider};
use stockroom_live::{KeepAlive, Registry};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use config::{Environment, ServerConfig};
use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    let api_routes = Router::new()
        // Products
        .route(
            "/products",
            get(routes::products::list_products).post(routes::products::create_product),
        )
        .route(
            "/products/{id}",
            put(routes::products::update_product).delete(routes::products::delete_product),
        )
        // Sales
        .route(
            "/sales",
            get(routes::sales::list_sales).post(routes::sales::create_sale),
        )
        .route("/sales/stats", get(routes::sales::stats))
        .route("/sales/today", get(routes::sales::today))
        .route("/sales/unique-customers", get(routes::sales::unique_customers))
        // Profiles
        .route(
            "/auth/profile",
            get(routes::profile::get_profile)
                .post(routes::profile::save_profile)
                .put(routes::profile::update_profile),
        )
        .route("/users/profile", put(routes::profile::upsert_profile))
        .route("/users/profile-image", post(routes::profile::set_profile_image));

    // The event stream sets its own wildcard origin header, so it stays
    // outside the API's CORS layer.
    let event_routes = Router::new()
        .route("/events", get(events::subscribe))
        .route("/events/test", get(events::test));

    let site_routes = Router::new()
        .route("/", get(routes::root::index))
        .route("/favicon.ico", get(routes::root::favicon))
        .nest("/api", api_routes)
        .layer(cors::api_cors(config));

    Router::new()
        .merge(event_routes)
        .merge(site_routes)
        .fallback(routes::root::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the web server until Ctrl+C.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let identity = StaticIdentityProvider::from_pairs(config.tokens.as_slice())?;
    if identity.is_empty() {
        warn!("No API tokens configured; every /api request will be rejected");
    }

    let registry = Arc::new(Registry::with_limit(config.max_channels));
    let state = AppState::new(
        Arc::new(MemoryStore::new()),
        Arc::new(identity),
        Arc::clone(&registry),
        config.environment,
    );
    let keepalive = KeepAlive::spawn(&registry, config.keepalive_period);
    let app = create_router(state, &config);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!(
        environment = %config.environment,
        "Web server listening on http://{}:{}",
        config.host,
        config.port
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(Arc::clone(&registry)))
        .await?;

    keepalive.stop();
    info!("Web server stopped");
    Ok(())
}

/// Resolve on Ctrl+C, closing every event stream so open connections can
/// finish and the graceful shutdown completes.
async fn shutdown_signal(registry: Arc<Registry>) {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    let drained = registry.shutdown();
    info!(drained, "Shutting down, closed live event streams");
}
