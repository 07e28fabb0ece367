//! Recipe Catalog API Server
//!
//! Stores recipes with their ingredients, steps and nutrients, and lets anonymous
//! clients vote on them once per IP address.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor};
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{
    ensure_schema, PostgresNutrientTypeRepository, PostgresRecipeRepository,
    PostgresRecipeTypeRepository,
};
use app::RecipeService;
use config::{Config, RateLimit};
use domain::ports::{NutrientTypeRepository, RecipeRepository, RecipeTypeRepository};

/// Recipe service as wired into the HTTP layer
pub type CatalogService =
    RecipeService<dyn RecipeRepository, dyn RecipeTypeRepository, dyn NutrientTypeRepository>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub recipe_service: Arc<CatalogService>,
    pub config: Config,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the HTTP router
///
/// `rate_limit` throttles the voting endpoint per client IP; `None` leaves it open.
pub fn router(state: AppState, rate_limit: Option<&RateLimit>) -> Router {
    let rating_routes = Router::new().route(
        "/recipes/:id/rating/:rate",
        post(handlers::rate_recipe),
    );
    let rating_routes = match rate_limit {
        Some(limit) => rate_limited(rating_routes, limit, state.config.trust_forwarded_for),
        None => rating_routes,
    };

    let catalog = Router::new()
        .route(
            "/recipes",
            get(handlers::list_recipes).post(handlers::create_recipe),
        )
        .route(
            "/recipes/:id",
            get(handlers::get_recipe).delete(handlers::delete_recipe),
        )
        .route("/recipe-types", get(handlers::list_recipe_types))
        .route("/nutrient-types", get(handlers::list_nutrient_types))
        .merge(rating_routes);

    let prefix = state.config.api_prefix.clone();
    let app = Router::new().route("/health", get(health));
    let app = if prefix.is_empty() {
        app.merge(catalog)
    } else {
        app.nest(&prefix, catalog)
    };

    app.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// Token bucket per client IP. Behind a proxy the key comes from forwarding headers,
/// otherwise from the socket peer.
fn rate_limited(
    routes: Router<AppState>,
    limit: &RateLimit,
    trust_forwarded_for: bool,
) -> Router<AppState> {
    if trust_forwarded_for {
        let config = GovernorConfigBuilder::default()
            .key_extractor(SmartIpKeyExtractor)
            .per_second(limit.per_second)
            .burst_size(limit.burst_size)
            .finish();
        match config {
            Some(config) => routes.layer(GovernorLayer {
                config: Arc::new(config),
            }),
            None => {
                tracing::warn!(?limit, "Invalid rating rate limit, voting is not throttled");
                routes
            }
        }
    } else {
        let config = GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(limit.per_second)
            .burst_size(limit.burst_size)
            .finish();
        match config {
            Some(config) => routes.layer(GovernorLayer {
                config: Arc::new(config),
            }),
            None => {
                tracing::warn!(?limit, "Invalid rating rate limit, voting is not throttled");
                routes
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,recipe_catalog_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Recipe Catalog API...");

    // Load configuration
    let config = Config::from_env()?;

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    if config.run_migrations {
        ensure_schema(&db)
            .await
            .context("Failed to create database schema")?;
        tracing::info!("Database schema ready");
    }

    // Create adapters
    let recipe_repo: Arc<dyn RecipeRepository> =
        Arc::new(PostgresRecipeRepository::new(db.clone()));
    let recipe_type_repo: Arc<dyn RecipeTypeRepository> =
        Arc::new(PostgresRecipeTypeRepository::new(db.clone()));
    let nutrient_type_repo: Arc<dyn NutrientTypeRepository> =
        Arc::new(PostgresNutrientTypeRepository::new(db));

    // Create application services
    let recipe_service = Arc::new(RecipeService::new(
        recipe_repo,
        recipe_type_repo,
        nutrient_type_repo,
    ));

    let state = AppState {
        recipe_service,
        config: config.clone(),
    };

    let app = router(state, Some(&config.rating_limit));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
