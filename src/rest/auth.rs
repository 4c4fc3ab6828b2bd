// rest/auth.rs — Bearer token auth middleware.
//
// Header: Authorization: Bearer <token>
// The token is resolved against the identity store; every task route runs
// behind this gate. A rejected request never reaches a store mutation.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use std::sync::Arc;

use crate::identity::{IdentityError, User};
use crate::AppContext;

/// The user resolved by the auth gate, attached to the request extensions.
/// Task handlers read it to confirm authentication happened — tasks are not
/// scoped by owner.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

pub async fn require_auth(
    State(ctx): State<Arc<AppContext>>,
    mut req: Request,
    next: Next,
) -> Response {
    // Extract Bearer token from Authorization header
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_owned);

    let Some(token) = token else {
        return unauthorized(&ctx);
    };

    match ctx.identity.authenticate(&token).await {
        Ok(user) => {
            req.extensions_mut().insert(AuthUser(user));
            next.run(req).await
        }
        Err(_) => unauthorized(&ctx),
    }
}

fn unauthorized(ctx: &AppContext) -> Response {
    ctx.metrics.inc_unauthorized();
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": IdentityError::UnknownToken.to_string() })),
    )
        .into_response()
}
