//! Middleware for the admin gate and request logging

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use portal_auth::StaffRecord;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::error::{GatewayError, GatewayResult};
use crate::state::GatewayState;

/// The caller's own admin session, resolved from its bearer token.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub token: String,
    pub admin: StaffRecord,
}

/// Token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Rejects requests unless the caller's token owns a session marker, and
/// exposes that session to handlers through request extensions.
pub async fn require_admin(
    State(state): State<Arc<GatewayState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, GatewayError> {
    let token = bearer_token(&request)
        .ok_or(GatewayError::NotLoggedIn)?
        .to_string();
    let admin = state
        .authenticator()
        .current_admin(&token)
        .await?
        .ok_or(GatewayError::NotLoggedIn)?;

    request
        .extensions_mut()
        .insert(AdminSession { token, admin });
    Ok(next.run(request).await)
}

/// Extract the session placed by [`require_admin`]
pub fn extract_admin(request: &Request) -> GatewayResult<AdminSession> {
    request
        .extensions()
        .get::<AdminSession>()
        .cloned()
        .ok_or(GatewayError::NotLoggedIn)
}

pub fn create_trace_middleware() -> TraceLayer<
    tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>,
> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}

/// Logging middleware for request/response logging
pub async fn logging_middleware(
    request: Request,
    next: Next,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let start = std::time::Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed();

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = duration.as_millis(),
        "Request completed"
    );

    Ok(response)
}

/// The public pages are read-only; any origin may fetch them.
pub fn create_cors_middleware() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::ACCEPT, header::AUTHORIZATION, header::CONTENT_TYPE])
}
