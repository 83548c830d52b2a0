//! Shared application state for the gateway

use std::sync::Arc;

use portal_auth::Authenticator;
use portal_content::FeedService;
use portal_runtime::PortalServices;

/// Services every handler can reach.
#[derive(Clone)]
pub struct GatewayState {
    /// Home page feeds
    pub feeds: Arc<FeedService>,
    /// Staff login and session marker
    pub authenticator: Authenticator,
    /// Backing content store, reported by `/health`
    pub content_source: String,
}

impl GatewayState {
    pub fn new(
        feeds: Arc<FeedService>,
        authenticator: Authenticator,
        content_source: impl Into<String>,
    ) -> Self {
        Self {
            feeds,
            authenticator,
            content_source: content_source.into(),
        }
    }

    pub fn feeds(&self) -> &FeedService {
        &self.feeds
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }
}

impl From<&PortalServices> for GatewayState {
    fn from(services: &PortalServices) -> Self {
        Self::new(
            Arc::clone(&services.feeds),
            services.authenticator.clone(),
            services.client.source(),
        )
    }
}
