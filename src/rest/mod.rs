// rest/mod.rs — Public REST API server.
//
// Axum HTTP server; task routes sit behind the bearer-token auth gate,
// identity/health/metrics routes do not.
//
// Endpoints:
//   POST /api/v1/register
//   POST /api/v1/login
//   GET  /api/v1/tasks
//   POST /api/v1/tasks
//   PUT  /api/v1/tasks/{id}/category
//   PUT  /api/v1/tasks/{id}/complete
//   PUT  /api/v1/tasks/{id}/priority
//   GET  /api/v1/metrics
//   GET  /api/v1/health

pub mod auth;
pub mod routes;

use anyhow::Result;
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::AppContext;

pub async fn start_rest_server(ctx: Arc<AppContext>) -> Result<()> {
    let bind = format!("{}:{}", ctx.config.bind_address, ctx.config.port);
    let addr: SocketAddr = bind.parse()?;

    let router = build_router(ctx);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("REST API listening on http://{}", addr);
    axum::serve(listener, router).await?;
    Ok(())
}

pub fn build_router(ctx: Arc<AppContext>) -> Router {
    let tasks = Router::new()
        .route(
            "/api/v1/tasks",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route("/api/v1/tasks/{id}/category", put(routes::tasks::set_category))
        .route("/api/v1/tasks/{id}/complete", put(routes::tasks::complete_task))
        .route("/api/v1/tasks/{id}/priority", put(routes::tasks::set_priority))
        .route_layer(middleware::from_fn_with_state(
            ctx.clone(),
            auth::require_auth,
        ));

    Router::new()
        // Health (no auth)
        .route("/api/v1/health", get(routes::health::health))
        // Metrics (no auth)
        .route("/api/v1/metrics", get(routes::metrics::get_metrics))
        // Identity
        .route("/api/v1/register", post(routes::identity::register))
        .route("/api/v1/login", post(routes::identity::login))
        .merge(tasks)
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}
