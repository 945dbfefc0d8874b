//! Banner Backend
//!
//! Serves the V1/V2 banner collections from JSON files and keeps holiday banners
//! in sync with an external calendar feed.

mod api;
mod auth;
mod config;
mod errors;
mod holidays;
mod models;
mod store;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use holidays::{HolidayReconciler, HolidayTable, HttpCalendarFeed};
use store::BannerStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<BannerStore>,
    pub reconciler: Arc<HolidayReconciler>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Banner Backend");
    tracing::info!("V1 banner file: {:?}", config.v1_path);
    tracing::info!("V2 banner file: {:?}", config.v2_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.api_psk.is_none() {
        tracing::warn!("No API PSK configured (BANNER_API_PSK). Authentication is disabled!");
    }

    let store = Arc::new(BannerStore::open(&config.v1_path, &config.v2_path));
    store.log_summary().await;

    let table = match &config.holidays_path {
        Some(path) => HolidayTable::load(path).await?,
        None => HolidayTable::default(),
    };
    tracing::info!("Holiday table loaded with {} keywords", table.entries().len());

    let feed = Arc::new(HttpCalendarFeed::new(
        &config.calendar_url,
        config.feed_timeout,
    )?);
    let reconciler = Arc::new(HolidayReconciler::new(
        feed,
        store.clone(),
        table,
        config.lookahead_days,
    ));

    if config.reconcile_enabled {
        holidays::spawn_daily(reconciler.clone(), config.reconcile_hour_utc);
        tracing::info!(
            "Holiday reconciliation scheduled daily at {:02}:00 UTC (lookahead {} days)",
            config.reconcile_hour_utc,
            config.lookahead_days
        );
    } else {
        tracing::warn!("Holiday reconciliation disabled (BANNER_RECONCILE_ENABLED)");
    }

    let state = AppState {
        store,
        reconciler,
        config: Arc::new(config.clone()),
    };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let psk = state.config.api_psk.clone();

    let api_routes = Router::new()
        // V1 banners
        .route(
            "/v1/banners",
            get(api::list_v1_banners).post(api::create_v1_banner),
        )
        .route(
            "/v1/banners/{id}",
            get(api::get_v1_banner)
                .patch(api::edit_v1_banner)
                .delete(api::delete_v1_banner),
        )
        // V2 banners
        .route(
            "/v2/banners",
            get(api::list_v2_banners).post(api::create_v2_banner),
        )
        .route(
            "/v2/banners/{id}",
            get(api::get_v2_banner)
                .patch(api::edit_v2_banner)
                .delete(api::delete_v2_banner),
        )
        // Holidays
        .route("/holidays/reconcile", post(api::reconcile_holidays))
        .layer(middleware::from_fn(move |req, next| {
            auth::psk_auth_layer(psk.clone(), req, next)
        }));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
