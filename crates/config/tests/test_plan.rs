//! Test plan for the `portal-config` crate.
//!
//! These tests exercise the configuration loader across default handling,
//! file discovery, environment overrides, and the legacy backend variables.

use std::fs;
use std::path::{Path, PathBuf};

use serial_test::serial;
use tempfile::TempDir;

use portal_config::{load, AppConfig, AuthConfig, BackendConfig, FeedConfig, HttpConfig};

const ENV_VARS_TO_RESET: &[&str] = &[
    "PORTAL_CONFIG",
    "PORTAL__HTTP__ADDRESS",
    "PORTAL__HTTP__PORT",
    "PORTAL__BACKEND__URL",
    "PORTAL__BACKEND__ANON_KEY",
    "PORTAL__BACKEND__REQUEST_TIMEOUT_SECONDS",
    "PORTAL__FEEDS__EVENT_LIMIT",
    "PORTAL__FEEDS__ACTIVE_STATUS",
    "PORTAL__AUTH__SESSION_PATH",
    "PORTAL__AUTH__ALLOW_LEGACY_PLAINTEXT",
    "NEXT_PUBLIC_SUPABASE_URL",
    "NEXT_PUBLIC_SUPABASE_ANON_KEY",
];

struct TestContext {
    vars: Vec<(String, Option<String>)>,
    original_dir: Option<PathBuf>,
}

impl TestContext {
    fn new() -> Self {
        Self {
            vars: Vec::new(),
            original_dir: None,
        }
    }

    fn reset_environment(&mut self) {
        for key in ENV_VARS_TO_RESET {
            self.remove_var(key);
        }
    }

    fn set_var(&mut self, key: &str, value: impl AsRef<str>) {
        let previous = std::env::var(key).ok();
        std::env::set_var(key, value.as_ref());
        self.vars.push((key.to_string(), previous));
    }

    fn remove_var(&mut self, key: &str) {
        let previous = std::env::var(key).ok();
        std::env::remove_var(key);
        self.vars.push((key.to_string(), previous));
    }

    fn set_current_dir(&mut self, dir: &Path) {
        if self.original_dir.is_none() {
            self.original_dir =
                Some(std::env::current_dir().expect("failed to capture current directory"));
        }
        std::env::set_current_dir(dir).expect("failed to set current directory");
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        if let Some(original) = self.original_dir.take() {
            let _ = std::env::set_current_dir(original);
        }

        while let Some((key, value)) = self.vars.pop() {
            match value {
                Some(val) => std::env::set_var(&key, val),
                None => std::env::remove_var(&key),
            }
        }
    }
}

fn write_config_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create config directories");
    }
    fs::write(path, contents).expect("failed to write config file");
}

fn isolated() -> (TempDir, TestContext) {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());
    (temp_dir, ctx)
}

#[test]
#[serial]
fn load_uses_default_values_when_no_files_found() {
    let (_temp_dir, _ctx) = isolated();

    let config = load().expect("configuration load should succeed without files");
    let defaults = AppConfig::default();

    assert_eq!(config.http.address, defaults.http.address);
    assert_eq!(config.http.port, defaults.http.port);
    assert!(!config.backend.is_configured());
    assert!(config.backend.anon_key.is_none());
    assert_eq!(config.feeds.event_limit, 3);
    assert_eq!(config.feeds.announcement_limit, 3);
    assert_eq!(config.feeds.photo_limit, 4);
    assert_eq!(config.feeds.active_status, "aktif");
    assert_eq!(config.feeds.published_status, 1);
    assert_eq!(config.auth.session_key, "admin");
    assert_eq!(config.auth.admin_redirect, "/admin");
    assert!(config.auth.allow_legacy_plaintext);
}

#[test]
#[serial]
fn load_picks_first_available_file_in_search_order() {
    let (temp_dir, _ctx) = isolated();

    write_config_file(
        temp_dir.path(),
        "portal.toml",
        r#"
        [http]
        port = 4242
        "#,
    );
    write_config_file(
        temp_dir.path(),
        "config/portal.toml",
        r#"
        [http]
        port = 5151
        "#,
    );

    let config = load().expect("configuration load should pick the first file");
    assert_eq!(config.http.port, 4242);
}

#[test]
#[serial]
fn load_merges_partial_file_with_defaults() {
    let (temp_dir, _ctx) = isolated();

    write_config_file(
        temp_dir.path(),
        "portal.toml",
        r#"
        [backend]
        url = "https://school.example.co"
        anon_key = "anon"

        [feeds]
        photo_limit = 8
        "#,
    );

    let config = load().expect("configuration load should succeed");
    let defaults = AppConfig::default();

    assert_eq!(config.backend.url, "https://school.example.co");
    assert_eq!(config.backend.anon_key.as_deref(), Some("anon"));
    assert_eq!(
        config.backend.request_timeout_seconds,
        defaults.backend.request_timeout_seconds
    );
    assert_eq!(config.feeds.photo_limit, 8);
    assert_eq!(config.feeds.event_limit, defaults.feeds.event_limit);
    assert_eq!(config.http.port, defaults.http.port);
}

#[test]
#[serial]
fn load_reads_explicit_config_path() {
    let (temp_dir, mut ctx) = isolated();

    write_config_file(
        temp_dir.path(),
        "elsewhere/custom.toml",
        r#"
        [auth]
        session_path = "/var/lib/portal/session.json"
        "#,
    );
    ctx.set_var(
        "PORTAL_CONFIG",
        temp_dir.path().join("elsewhere/custom.toml").display().to_string(),
    );

    let config = load().expect("configuration load should read PORTAL_CONFIG");
    assert_eq!(config.auth.session_path, "/var/lib/portal/session.json");
}

#[test]
#[serial]
fn load_applies_environment_overrides() {
    let (temp_dir, mut ctx) = isolated();

    write_config_file(
        temp_dir.path(),
        "portal.toml",
        r#"
        [http]
        port = 3030
        "#,
    );

    ctx.set_var("PORTAL__HTTP__PORT", "8080");
    ctx.set_var("PORTAL__FEEDS__ACTIVE_STATUS", "published");
    ctx.set_var("PORTAL__AUTH__ALLOW_LEGACY_PLAINTEXT", "false");

    let config = load().expect("configuration load should honour env overrides");
    assert_eq!(config.http.port, 8080);
    assert_eq!(config.feeds.active_status, "published");
    assert!(!config.auth.allow_legacy_plaintext);
}

#[test]
#[serial]
fn load_falls_back_to_legacy_backend_variables() {
    let (_temp_dir, mut ctx) = isolated();

    ctx.set_var("NEXT_PUBLIC_SUPABASE_URL", "https://legacy.example.co");
    ctx.set_var("NEXT_PUBLIC_SUPABASE_ANON_KEY", "legacy-anon");

    let config = load().expect("configuration load should read legacy variables");
    assert_eq!(config.backend.url, "https://legacy.example.co");
    assert_eq!(config.backend.anon_key.as_deref(), Some("legacy-anon"));
}

#[test]
#[serial]
fn load_prefers_portal_backend_settings_over_legacy_variables() {
    let (_temp_dir, mut ctx) = isolated();

    ctx.set_var("PORTAL__BACKEND__URL", "https://primary.example.co");
    ctx.set_var("PORTAL__BACKEND__ANON_KEY", "primary-anon");
    ctx.set_var("NEXT_PUBLIC_SUPABASE_URL", "https://legacy.example.co");
    ctx.set_var("NEXT_PUBLIC_SUPABASE_ANON_KEY", "legacy-anon");

    let config = load().expect("configuration load should succeed");
    assert_eq!(config.backend.url, "https://primary.example.co");
    assert_eq!(config.backend.anon_key.as_deref(), Some("primary-anon"));
}

#[test]
#[serial]
fn load_errors_on_invalid_toml_contents() {
    let (temp_dir, _ctx) = isolated();

    write_config_file(
        temp_dir.path(),
        "portal.toml",
        r#"
        [http]
        port = "not-a-number
        "#,
    );

    let error = load().expect_err("invalid TOML should cause load to fail");
    let message = error.to_string();
    assert!(
        message.contains("invalid configuration")
            || message.contains("unable to build configuration"),
        "unexpected error message: {message}"
    );
}

#[test]
fn backend_config_reports_configuration_state() {
    let mut backend = BackendConfig::default();
    assert!(!backend.is_configured());

    backend.url = "   ".to_string();
    assert!(!backend.is_configured());

    backend.url = "https://school.example.co".to_string();
    assert!(backend.is_configured());
}

#[test]
fn feed_config_defaults_match_home_page_caps() {
    let defaults = FeedConfig::default();
    assert_eq!(defaults.event_limit, 3);
    assert_eq!(defaults.announcement_limit, 3);
    assert_eq!(defaults.photo_limit, 4);
}

#[test]
fn auth_config_defaults_store_admin_marker() {
    let defaults = AuthConfig::default();
    assert_eq!(defaults.session_key, "admin");
    assert_eq!(defaults.session_path, "portal-session.json");
}

#[test]
fn http_config_defaults_match_expected_host_and_port() {
    let defaults = HttpConfig::default();
    assert_eq!(defaults.address, "127.0.0.1");
    assert_eq!(defaults.port, 7070);
}
