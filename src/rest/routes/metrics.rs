// rest/routes/metrics.rs — GET /api/v1/metrics (Prometheus text format).

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::AppContext;

pub async fn get_metrics(State(ctx): State<Arc<AppContext>>) -> impl IntoResponse {
    let user_count = ctx.identity.user_count().await as u64;
    let task_count = ctx.tasks.task_count().await as u64;
    let body = ctx.metrics.render_prometheus(user_count, task_count);
    ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body)
}
