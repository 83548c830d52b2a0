use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "portal.toml",
    "config/portal.toml",
    "crates/config/portal.toml",
    "../portal.toml",
    "../config/portal.toml",
];

/// Backend variables already exported by existing frontend deployments.
const LEGACY_URL_VAR: &str = "NEXT_PUBLIC_SUPABASE_URL";
const LEGACY_KEY_VAR: &str = "NEXT_PUBLIC_SUPABASE_ANON_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub backend: BackendConfig,
    pub feeds: FeedConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 7070,
        }
    }
}

/// Connection settings for the hosted content store.
///
/// ```
/// use portal_config::BackendConfig;
///
/// let backend = BackendConfig::default();
/// assert!(backend.url.is_empty());
/// assert_eq!(backend.request_timeout_seconds, 10);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub anon_key: Option<String>,
    #[serde(default = "BackendConfig::default_request_timeout")]
    pub request_timeout_seconds: u64,
    #[serde(default)]
    pub schema: Option<String>,
}

impl BackendConfig {
    const fn default_request_timeout() -> u64 {
        10
    }

    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: None,
            request_timeout_seconds: Self::default_request_timeout(),
            schema: None,
        }
    }
}

/// Filter sentinels and result caps for the home page feeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub event_limit: usize,
    pub announcement_limit: usize,
    pub photo_limit: usize,
    pub active_status: String,
    pub published_status: i64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            event_limit: 3,
            announcement_limit: 3,
            photo_limit: 4,
            active_status: "aktif".to_string(),
            published_status: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub session_path: String,
    pub session_key: String,
    #[serde(default = "AuthConfig::default_allow_legacy_plaintext")]
    pub allow_legacy_plaintext: bool,
    pub admin_redirect: String,
}

impl AuthConfig {
    const fn default_allow_legacy_plaintext() -> bool {
        true
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_path: "portal-session.json".to_string(),
            session_key: "admin".to_string(),
            allow_legacy_plaintext: Self::default_allow_legacy_plaintext(),
            admin_redirect: "/admin".to_string(),
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use portal_config::load;
///
/// std::env::remove_var("PORTAL_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// assert_eq!(config.feeds.event_limit, 3);
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let mut builder = config::Config::builder()
        .set_default("http.address", defaults.http.address.clone())?
        .set_default("http.port", i64::from(defaults.http.port))?
        .set_default("backend.url", defaults.backend.url.clone())?
        .set_default(
            "backend.request_timeout_seconds",
            i64::try_from(defaults.backend.request_timeout_seconds).unwrap_or(i64::MAX),
        )?
        .set_default("feeds.event_limit", defaults.feeds.event_limit as i64)?
        .set_default(
            "feeds.announcement_limit",
            defaults.feeds.announcement_limit as i64,
        )?
        .set_default("feeds.photo_limit", defaults.feeds.photo_limit as i64)?
        .set_default("feeds.active_status", defaults.feeds.active_status.clone())?
        .set_default("feeds.published_status", defaults.feeds.published_status)?
        .set_default("auth.session_path", defaults.auth.session_path.clone())?
        .set_default("auth.session_key", defaults.auth.session_key.clone())?
        .set_default(
            "auth.allow_legacy_plaintext",
            defaults.auth.allow_legacy_plaintext,
        )?
        .set_default("auth.admin_redirect", defaults.auth.admin_redirect.clone())?;

    let environment_overrides = config::Environment::with_prefix("PORTAL").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("PORTAL_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via PORTAL_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let mut config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    apply_legacy_backend_env(&mut config.backend);

    debug!(
        backend_configured = config.backend.is_configured(),
        http = ?config.http,
        feeds = ?config.feeds,
        "loaded portal configuration"
    );
    Ok(config)
}

fn apply_legacy_backend_env(backend: &mut BackendConfig) {
    if !backend.is_configured() {
        if let Ok(url) = std::env::var(LEGACY_URL_VAR) {
            debug!(var = LEGACY_URL_VAR, "using legacy backend url variable");
            backend.url = url;
        }
    }

    if backend.anon_key.is_none() {
        if let Ok(key) = std::env::var(LEGACY_KEY_VAR) {
            debug!(var = LEGACY_KEY_VAR, "using legacy backend key variable");
            backend.anon_key = Some(key);
        }
    }
}
