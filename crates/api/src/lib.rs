//! # Kourt API
//!
//! The API crate provides the web server of the Kourt court-booking service.
//! It exposes court availability, the booking lifecycle (create, cancel,
//! confirm payment) and arena opening hours over HTTP.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Map domain errors to HTTP responses
//! - **Config**: Handle environment and application configuration
//! - **Cache**: Hold recently computed slot lists
//!
//! Handlers only see the repository traits from `kourt-db`, so tests can run
//! the full router against mockall doubles instead of PostgreSQL.

/// In-memory cache of computed slot lists
pub mod cache;
/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Error mapping to HTTP responses
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use eyre::Result;
use kourt_db::{
    repositories::{BookingRepository, PgRepository, ScheduleRepository},
    DbPool,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use crate::cache::SlotCache;

/// Shared application state that is accessible to all request handlers
///
/// Everything here is constructed once at startup and passed down
/// explicitly; handlers never reach for globals.
pub struct ApiState {
    /// Booking storage
    pub bookings: Arc<dyn BookingRepository>,
    /// Arena schedule storage
    pub schedules: Arc<dyn ScheduleRepository>,
    /// Recently computed availability
    pub slot_cache: SlotCache,
}

impl ApiState {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        schedules: Arc<dyn ScheduleRepository>,
        slot_cache: SlotCache,
    ) -> Self {
        Self {
            bookings,
            schedules,
            slot_cache,
        }
    }

    /// State backed by PostgreSQL for both repositories.
    pub fn with_pool(db_pool: DbPool, cache_ttl: Duration) -> Self {
        let repository = Arc::new(PgRepository::new(db_pool));
        Self::new(repository.clone(), repository, SlotCache::new(cache_ttl))
    }
}

/// Builds the application router with all routes attached to `state`.
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Court availability endpoints
        .merge(routes::availability::routes())
        // Booking lifecycle endpoints
        .merge(routes::bookings::routes())
        // Arena opening hours endpoints
        .merge(routes::schedules::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(origins)
        .allow_credentials(true)
}

/// Starts the API server with the provided configuration and database connection
///
/// Initializes logging, builds the shared state and router, and serves HTTP
/// until the process is stopped.
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// let config = kourt_api::config::ApiConfig::from_env()?;
/// let db_pool = kourt_db::create_pool(&config.database_url).await?;
/// kourt_api::start_server(config, db_pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: DbPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::with_pool(
        db_pool,
        config.availability_cache_ttl,
    ));
    info!(
        "Availability cache {}",
        if state.slot_cache.is_enabled() {
            format!("enabled with a {:?} TTL", config.availability_cache_ttl)
        } else {
            "disabled".to_string()
        }
    );

    let app = router(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    let app = app.layer(
        ServiceBuilder::new()
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
