use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use portal_config::{load as load_config, AppConfig};
use portal_gateway::{create_router, GatewayState};
use portal_runtime::{fixture_transport, telemetry, PortalServices};
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "portal-server")]
#[command(about = "SMKN 4 Bogor portal backend (serves HTTP by default)")]
struct Cli {
    /// Read content from a JSON table snapshot instead of the hosted store
    /// (`sample` selects the bundled snapshot)
    #[arg(long, global = true, value_name = "PATH")]
    fixtures: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Fetch the home page feeds once and print them as JSON
    DumpFeeds,
    /// Print an argon2 hash for a petugas password
    HashPassword { password: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server(cli.fixtures.as_deref()).await,
        Commands::DumpFeeds => dump_feeds(cli.fixtures.as_deref()).await,
        Commands::HashPassword { password } => hash_password(&password),
    }
}

async fn build_services(config: &AppConfig, fixtures: Option<&Path>) -> anyhow::Result<PortalServices> {
    match fixtures {
        Some(source) => {
            let transport = fixture_transport(source).await?;
            Ok(PortalServices::with_transport(config, transport))
        }
        None => PortalServices::initialise(config).context("failed to initialise portal services"),
    }
}

async fn run_server(fixtures: Option<&Path>) -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    info!("starting portal backend");

    let config = load_config().context("failed to load configuration")?;
    let services = build_services(&config, fixtures).await?;
    let app = create_router(GatewayState::from(&services));

    let address = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(portal_runtime::shutdown_signal())
        .await
        .context("http server error")?;

    info!("backend shut down");
    Ok(())
}

async fn dump_feeds(fixtures: Option<&Path>) -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    let config = load_config().context("failed to load configuration")?;
    let services = build_services(&config, fixtures).await?;

    let home = services.feeds.home().await;
    info!(
        events = home.events.len(),
        announcements = home.announcements.len(),
        photos = home.photos.len(),
        "feeds fetched"
    );
    println!(
        "{}",
        serde_json::to_string_pretty(&home).context("failed to encode feeds")?
    );

    Ok(())
}

fn hash_password(password: &str) -> anyhow::Result<()> {
    let hash = portal_auth::hash_password(password).context("failed to hash password")?;
    println!("{hash}");
    Ok(())
}
