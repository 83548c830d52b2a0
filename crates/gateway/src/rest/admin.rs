//! Staff login endpoints

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use utoipa::ToSchema;

use crate::error::{GatewayError, GatewayResult};
use crate::middleware::{extract_admin, require_admin};
use crate::state::GatewayState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Where the client navigates next
    pub redirect: String,
    /// The staff record exactly as stored
    #[schema(value_type = Object)]
    pub admin: Value,
    /// Bearer token for the admin endpoints
    pub token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

pub fn create_admin_routes(state: Arc<GatewayState>) -> Router<Arc<GatewayState>> {
    let protected = Router::new()
        .route("/api/admin/session", get(session))
        .route("/api/admin/logout", post(logout))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/api/admin/login", post(login))
        .merge(protected)
}

#[utoipa::path(
    post,
    path = "/api/admin/login",
    tag = "Admin",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; session marker stored", body = LoginResponse),
        (status = 401, description = "Username atau password salah", body = ErrorResponse),
        (status = 502, description = "Terjadi kesalahan saat login", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<LoginRequest>,
) -> GatewayResult<Json<LoginResponse>> {
    let outcome = state
        .authenticator()
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(LoginResponse {
        redirect: outcome.redirect,
        admin: serde_json::to_value(outcome.admin)?,
        token: outcome.token,
    }))
}

#[utoipa::path(
    get,
    path = "/api/admin/session",
    tag = "Admin",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Stored admin record", content_type = "application/json"),
        (status = 401, description = "No admin session for this token", body = ErrorResponse)
    )
)]
pub async fn session(request: Request) -> GatewayResult<Json<Value>> {
    let session = extract_admin(&request)?;
    debug!(username = ?session.admin.username(), "admin session read");
    Ok(Json(serde_json::to_value(session.admin)?))
}

#[utoipa::path(
    post,
    path = "/api/admin/logout",
    tag = "Admin",
    security(("bearerAuth" = [])),
    responses(
        (status = 204, description = "Session marker for this token cleared"),
        (status = 401, description = "No admin session for this token", body = ErrorResponse)
    )
)]
pub async fn logout(
    State(state): State<Arc<GatewayState>>,
    request: Request,
) -> Result<StatusCode, GatewayError> {
    let session = extract_admin(&request)?;
    state.authenticator().logout(&session.token).await?;
    Ok(StatusCode::NO_CONTENT)
}
