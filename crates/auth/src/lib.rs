pub mod credentials;
pub mod password;
pub mod session;

use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};

use portal_config::AuthConfig;
use portal_content::{BackendClient, BackendError};

pub use credentials::{CredentialCheck, StaffRecord};
pub use password::{hash_password, verify_password};
pub use session::{FileSessionStore, MemorySessionStore, SessionError, SessionStore};

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Username atau password salah";
pub const LOGIN_FAILED_MESSAGE: &str = "Terjadi kesalahan saat login";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
    #[error("session store error: {0}")]
    Session(#[from] SessionError),
    #[error("password hashing failed: {0}")]
    PasswordHash(#[from] argon2::password_hash::Error),
}

impl AuthError {
    /// Message shown next to the login form.
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE,
            _ => LOGIN_FAILED_MESSAGE,
        }
    }
}

/// Result of a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    pub redirect: String,
    pub admin: StaffRecord,
    /// Opaque per-client token; the marker is only reachable through it.
    pub token: String,
}

#[derive(Clone)]
pub struct Authenticator {
    credentials: CredentialCheck,
    sessions: Arc<dyn SessionStore>,
    session_key: String,
    redirect: String,
}

impl Authenticator {
    pub fn new(client: BackendClient, sessions: Arc<dyn SessionStore>, config: &AuthConfig) -> Self {
        Self {
            credentials: CredentialCheck::new(client, config.allow_legacy_plaintext),
            sessions,
            session_key: config.session_key.clone(),
            redirect: config.admin_redirect.clone(),
        }
    }

    /// Verify credentials and persist the matched record as a session marker
    /// owned by a freshly issued token.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        let admin = match self.credentials.check(username, password).await {
            Ok(admin) => admin,
            Err(AuthError::InvalidCredentials) => return Err(AuthError::InvalidCredentials),
            Err(err) => {
                error!(username, error = %err, "login failed");
                return Err(err);
            }
        };

        let token = generate_session_token();
        let marker = serde_json::to_value(&admin).map_err(SessionError::from)?;
        self.sessions.set(&self.marker_key(&token), marker).await?;
        info!(username, "admin logged in");

        Ok(LoginOutcome {
            redirect: self.redirect.clone(),
            admin,
            token,
        })
    }

    /// The staff record stored for `token`, if that token is logged in.
    pub async fn current_admin(&self, token: &str) -> Result<Option<StaffRecord>, AuthError> {
        if token.is_empty() {
            return Ok(None);
        }
        let Some(value) = self.sessions.get(&self.marker_key(token)).await? else {
            return Ok(None);
        };
        let admin = serde_json::from_value(value).map_err(SessionError::from)?;
        Ok(Some(admin))
    }

    /// Clear the marker owned by `token`; other sessions are untouched.
    pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
        self.sessions.clear(&self.marker_key(token)).await?;
        info!("admin logged out");
        Ok(())
    }

    fn marker_key(&self, token: &str) -> String {
        format!("{}:{}", self.session_key, token)
    }
}

fn generate_session_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
