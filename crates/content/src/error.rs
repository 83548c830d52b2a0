//! Error types for content store access.

use serde::Deserialize;
use thiserror::Error;

/// The content store rejected or could not serve a query.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BackendError {
    /// The request never produced a response (connection refused, timeout, TLS).
    #[error("backend request failed: {0}")]
    Transport(String),

    /// The store answered with a non-success status.
    #[error("backend rejected query ({status}): {message}")]
    Rejected {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// The store answered but the body was not the expected shape.
    #[error("invalid backend response: {0}")]
    Decode(String),

    #[error("backend url is not configured")]
    NotConfigured,
}

impl BackendError {
    /// Diagnostic message as reported by the store, without the variant prefix.
    pub fn diagnostic(&self) -> &str {
        match self {
            BackendError::Transport(message) | BackendError::Decode(message) => message,
            BackendError::Rejected { message, .. } => message,
            BackendError::NotConfigured => "backend url is not configured",
        }
    }

    /// Build an error from a failed response body in the store's error envelope.
    pub(crate) fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => BackendError::Rejected {
                status,
                code: envelope.code,
                message: envelope
                    .message
                    .unwrap_or_else(|| format!("request failed with status {status}")),
            },
            Err(_) => BackendError::Rejected {
                status,
                code: None,
                message: if body.trim().is_empty() {
                    format!("request failed with status {status}")
                } else {
                    body.trim().to_string()
                },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BackendError::Decode(err.to_string())
        } else {
            BackendError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        BackendError::Decode(err.to_string())
    }
}

pub type BackendResult<T> = Result<T, BackendError>;
