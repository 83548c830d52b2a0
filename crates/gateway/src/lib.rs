//! # Portal Gateway Crate
//!
//! HTTP surface of the school portal: the landing page content feeds, the static
//! catalogue, and staff login backed by the admin session marker.
//!
//! ## Architecture
//!
//! - **REST**: JSON endpoints with OpenAPI documentation
//! - **State**: feeds and authenticator shared by every handler
//! - **Middleware**: admin gate, CORS, request logging
//!
//! ## Usage
//!
//! ```rust,no_run
//! use portal_gateway::{create_router, GatewayState};
//! use portal_runtime::PortalServices;
//!
//! # async fn example(services: PortalServices) -> std::io::Result<()> {
//! let app = create_router(GatewayState::from(&services));
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:7070").await?;
//! axum::serve(listener, app).await
//! # }
//! ```

pub mod error;
pub mod middleware;
pub mod rest;
pub mod state;

pub use error::{GatewayError, GatewayResult};
pub use state::GatewayState;

use std::sync::Arc;

use axum::{middleware as axum_middleware, Router};
#[cfg(debug_assertions)]
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Create the main application router with all routes
pub fn create_router(state: GatewayState) -> Router {
    let arc_state = Arc::new(state);
    #[allow(unused_mut)]
    let mut router = Router::new()
        .merge(rest::create_rest_routes(arc_state.clone()).with_state(arc_state))
        .layer(middleware::create_cors_middleware())
        .layer(middleware::create_trace_middleware())
        .layer(axum_middleware::from_fn(middleware::logging_middleware));

    // Swagger UI in debug builds
    #[cfg(debug_assertions)]
    {
        struct BearerAuth;

        impl Modify for BearerAuth {
            fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
                if let Some(components) = openapi.components.as_mut() {
                    components.add_security_scheme(
                        "bearerAuth",
                        SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
                    );
                }
            }
        }

        #[derive(OpenApi)]
        #[openapi(
            paths(
                rest::health::health_check,
                rest::content::home,
                rest::content::agenda,
                rest::content::informasi,
                rest::content::galeri,
                rest::content::programs,
                rest::content::program,
                rest::admin::login,
                rest::admin::session,
                rest::admin::logout,
            ),
            components(
                schemas(
                    rest::health::HealthResponse,
                    rest::content::HomePage,
                    rest::admin::LoginRequest,
                    rest::admin::LoginResponse,
                    rest::admin::ErrorResponse,
                    portal_content::EventCard,
                    portal_content::AnnouncementCard,
                    portal_content::PhotoCard,
                    portal_content::catalogue::Hero,
                    portal_content::catalogue::About,
                    portal_content::catalogue::Program,
                    portal_content::catalogue::Statistic,
                    portal_content::catalogue::RateStatistic,
                    portal_content::catalogue::Statistics,
                    portal_content::catalogue::Partner,
                )
            ),
            tags(
                (name = "Health", description = "Liveness"),
                (name = "Content", description = "Public page content"),
                (name = "Admin", description = "Staff login and session"),
            ),
            modifiers(&BearerAuth)
        )]
        struct ApiDoc;

        router = router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    router
}
