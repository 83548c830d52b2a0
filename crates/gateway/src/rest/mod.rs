//! REST API endpoints for the gateway

pub mod admin;
pub mod content;
pub mod health;

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::state::GatewayState;

/// Create all REST API routes
pub fn create_rest_routes(state: Arc<GatewayState>) -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/health", get(health::health_check))
        // Public page content
        .merge(content::create_content_routes())
        // Staff login
        .merge(admin::create_admin_routes(state))
}
