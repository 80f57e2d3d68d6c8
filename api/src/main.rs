//! Product API Server
//!
//! Course catalogue with lessons, groups, and purchases paid from an internal bonus balance.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;
mod state;

#[cfg(test)]
mod test_utils;


use config::Config;
pub use state::AppState;
use state::Repositories;

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

/// Routes that never go through the rate limiter
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Courses
        .route(
            "/courses",
            get(handlers::list_courses).post(handlers::create_course),
        )
        .route("/courses/can_buy", get(handlers::can_buy))
        .route(
            "/courses/:id",
            get(handlers::get_course)
                .put(handlers::replace_course)
                .patch(handlers::patch_course)
                .delete(handlers::delete_course),
        )
        .route("/courses/:id/pay", post(handlers::pay))
        // Lessons (nested under courses)
        .route(
            "/courses/:course_id/lessons",
            get(handlers::list_lessons).post(handlers::create_lesson),
        )
        .route(
            "/courses/:course_id/lessons/:id",
            get(handlers::get_lesson)
                .put(handlers::replace_lesson)
                .patch(handlers::patch_lesson)
                .delete(handlers::delete_lesson),
        )
        // Groups (nested under courses)
        .route(
            "/courses/:course_id/groups",
            get(handlers::list_groups).post(handlers::create_group),
        )
        .route(
            "/courses/:course_id/groups/:id",
            get(handlers::get_group)
                .put(handlers::replace_group)
                .patch(handlers::patch_group)
                .delete(handlers::delete_group),
        )
        // Users
        .route("/users/me", get(handlers::me))
        .layer(middleware::from_fn_with_state(
            state,
            auth::auth_middleware,
        ))
}

/// Build the full router with middleware applied
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    // Rate limiting config: 2 req/sec sustained, burst of 5
    // PeerIpKeyExtractor needs the socket address, see into_make_service_with_connect_info
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(2)
            .burst_size(5)
            .finish()
            .ok_or_else(|| anyhow::anyhow!("Invalid rate limit configuration"))?,
    );

    let rate_limited_routes = Router::new()
        .route("/users/register", post(handlers::register))
        .layer(GovernorLayer {
            config: governor_config,
        });

    let app = Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        .merge(rate_limited_routes)
        .merge(api_routes(state.clone()))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,product_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Product API...");

    let config = Config::from_env()?;

    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url).await?;
    tracing::info!("Database connected");

    let state = AppState::new(Repositories::postgres(db), &config);

    if let Some((username, api_key)) = config.admin_bootstrap() {
        let admin = state.user_service.ensure_admin(username, api_key).await?;
        tracing::info!(user_id = %admin.id, username = %admin.username, "Admin account ready");
    }

    let app = build_router(state)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
