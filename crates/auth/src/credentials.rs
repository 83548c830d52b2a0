//! Staff (petugas) credential lookup.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use portal_content::{BackendClient, BackendError, Query};

use crate::password::verify_password;
use crate::AuthError;

pub const STAFF_TABLE: &str = "petugas";

/// A staff row exactly as stored, every column preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaffRecord(Map<String, Value>);

impl StaffRecord {
    pub fn username(&self) -> Option<&str> {
        self.0.get("username").and_then(Value::as_str)
    }

    fn secret(&self) -> Option<&str> {
        self.0.get("password").and_then(Value::as_str)
    }
}

#[derive(Clone)]
pub struct CredentialCheck {
    client: BackendClient,
    allow_legacy_plaintext: bool,
}

impl CredentialCheck {
    pub fn new(client: BackendClient, allow_legacy_plaintext: bool) -> Self {
        Self {
            client,
            allow_legacy_plaintext,
        }
    }

    pub fn query(username: &str) -> Query {
        Query::table(STAFF_TABLE).eq("username", username).limit(2)
    }

    /// Return the stored record when exactly one row matches `username` and its
    /// password verifies.
    pub async fn check(&self, username: &str, password: &str) -> Result<StaffRecord, AuthError> {
        let mut rows: Vec<StaffRecord> = self.client.fetch(&Self::query(username)).await?;

        if rows.len() > 1 {
            return Err(AuthError::Backend(BackendError::Decode(format!(
                "username {username} matches more than one staff row"
            ))));
        }

        let Some(record) = rows.pop() else {
            info!(username, "login rejected: unknown username");
            return Err(AuthError::InvalidCredentials);
        };

        let verified = record
            .secret()
            .is_some_and(|secret| verify_password(password, secret, self.allow_legacy_plaintext));
        if !verified {
            info!(username, "login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        debug!(username, "staff credentials verified");
        Ok(record)
    }
}
