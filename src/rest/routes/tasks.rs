// rest/routes/tasks.rs — task CRUD and sorted listing.
//
// All routes here run behind the auth gate (rest/auth.rs); the resolved
// user arrives via request extensions.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

use crate::observability::LatencyTracker;
use crate::rest::auth::AuthUser;
use crate::tasks::{Priority, SortKey, Task};
use crate::AppContext;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
}

pub async fn create_task(
    State(ctx): State<Arc<AppContext>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<CreateTaskRequest>,
) -> (StatusCode, Json<Task>) {
    let tracker = LatencyTracker::start("tasks.create");
    // Absent fields are stored as defaults, never propagated as nulls.
    let task = ctx
        .tasks
        .create(
            body.title.unwrap_or_default(),
            body.description.unwrap_or_default(),
            body.due_date.unwrap_or_default(),
            body.category.unwrap_or_default(),
            body.priority.unwrap_or_default(),
        )
        .await;
    ctx.metrics.inc_tasks_created();
    tracker.finish();
    info!(user = %user.0.username, id = task.id, "task created");
    (StatusCode::CREATED, Json(task))
}

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
}

pub async fn list_tasks(
    State(ctx): State<Arc<AppContext>>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Task>> {
    let tracker = LatencyTracker::start("tasks.list");
    // Unrecognised selectors fall through to insertion order.
    let sort_by = query.sort_by.as_deref().and_then(SortKey::parse);
    let tasks = ctx.tasks.list(sort_by).await;
    tracker.finish();
    Json(tasks)
}

#[derive(Deserialize)]
pub struct SetCategoryRequest {
    #[serde(default)]
    pub category: Option<String>,
}

pub async fn set_category(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<u64>,
    Json(body): Json<SetCategoryRequest>,
) -> Result<Json<Task>, (StatusCode, Json<Value>)> {
    match ctx
        .tasks
        .set_category(id, body.category.unwrap_or_default())
        .await
    {
        Ok(task) => Ok(Json(task)),
        Err(e) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}

#[derive(Deserialize)]
pub struct SetPriorityRequest {
    #[serde(default)]
    pub priority: Option<Priority>,
}

pub async fn set_priority(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<u64>,
    Json(body): Json<SetPriorityRequest>,
) -> Result<Json<Task>, (StatusCode, Json<Value>)> {
    match ctx
        .tasks
        .set_priority(id, body.priority.unwrap_or_default())
        .await
    {
        Ok(task) => Ok(Json(task)),
        Err(e) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}

pub async fn complete_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<u64>,
) -> Result<Json<Task>, (StatusCode, Json<Value>)> {
    match ctx.tasks.complete(id).await {
        Ok(task) => {
            ctx.metrics.inc_tasks_completed();
            Ok(Json(task))
        }
        Err(e) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}
