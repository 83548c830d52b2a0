use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use portal_auth::{Authenticator, FileSessionStore, SessionStore};
use portal_config::AppConfig;
use portal_content::{BackendClient, ContentRepository, FeedService, MemoryTransport, Transport};
use tracing::info;

/// `--fixtures` value that selects the snapshot bundled with `portal-content`.
pub const SAMPLE_FIXTURES: &str = "sample";

pub mod telemetry {
    use anyhow::Result;
    use tracing::Level;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_max_level(Level::TRACE)
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

#[derive(Clone)]
pub struct PortalServices {
    pub client: BackendClient,
    pub feeds: Arc<FeedService>,
    pub authenticator: Authenticator,
}

impl PortalServices {
    /// Services backed by the hosted store and a file session marker.
    pub fn initialise(config: &AppConfig) -> Result<Self> {
        let client =
            BackendClient::rest(&config.backend).context("failed to build content store client")?;
        info!(url = %config.backend.url, "content store client ready");

        Ok(Self::assemble(config, client, file_sessions(config)))
    }

    /// Services reading from an arbitrary transport, e.g. a fixture snapshot.
    pub fn with_transport(config: &AppConfig, transport: Arc<dyn Transport>) -> Self {
        Self::assemble(config, BackendClient::from_shared(transport), file_sessions(config))
    }

    pub fn with_parts(
        config: &AppConfig,
        transport: Arc<dyn Transport>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self::assemble(config, BackendClient::from_shared(transport), sessions)
    }

    fn assemble(config: &AppConfig, client: BackendClient, sessions: Arc<dyn SessionStore>) -> Self {
        let feeds = Arc::new(FeedService::new(ContentRepository::new(
            client.clone(),
            config.feeds.clone(),
        )));
        let authenticator = Authenticator::new(client.clone(), sessions, &config.auth);

        Self {
            client,
            feeds,
            authenticator,
        }
    }
}

fn file_sessions(config: &AppConfig) -> Arc<dyn SessionStore> {
    Arc::new(FileSessionStore::new(&config.auth.session_path))
}

/// Load a fixture snapshot from `source`, or the bundled one for [`SAMPLE_FIXTURES`].
pub async fn fixture_transport(source: &Path) -> Result<Arc<MemoryTransport>> {
    let transport = if source.as_os_str() == SAMPLE_FIXTURES {
        MemoryTransport::sample().context("bundled fixture snapshot is invalid")?
    } else {
        MemoryTransport::from_file(source)
            .await
            .with_context(|| format!("failed to load fixtures from {}", source.display()))?
    };
    info!(source = %source.display(), "serving content from fixtures");
    Ok(Arc::new(transport))
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
