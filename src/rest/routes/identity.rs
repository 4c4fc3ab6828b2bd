// rest/routes/identity.rs — registration and login routes.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

use crate::AppContext;

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

pub async fn register(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    match ctx.identity.register(&body.username, &body.password).await {
        Ok(()) => {
            ctx.metrics.inc_users_registered();
            info!(username = %body.username, "user registered");
            Ok((
                StatusCode::CREATED,
                Json(json!({ "message": "user registered" })),
            ))
        }
        Err(e) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

pub async fn login(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match ctx.identity.login(&body.username, &body.password).await {
        Ok(token) => {
            ctx.metrics.inc_logins();
            Ok(Json(json!({ "token": token })))
        }
        Err(e) => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}
