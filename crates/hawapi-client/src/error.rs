//! Error types for the HawAPI client SDK.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Structured error body returned by the API on a non-matching status code.
///
/// Missing fields decode as empty; the client fills a zero `code` with the
/// HTTP status of the response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiErrorBody {
    /// Numeric HTTP status reported by the server
    pub code: u16,
    /// Status reason phrase (e.g. "Not Found")
    pub status: String,
    /// HTTP method of the failed request
    pub method: String,
    /// Short cause identifier
    pub cause: String,
    /// Request URL as seen by the server
    pub url: String,
    /// Human-readable detail
    pub message: String,
}

impl fmt::Display for ApiErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "request error [{} {}] using {} method",
            self.status, self.code, self.method
        )?;

        if !self.url.is_empty() {
            write!(f, " on '{}'", self.url)?;
        }

        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }

        Ok(())
    }
}

/// Errors that can occur when using the HawAPI client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, timeout, etc.)
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Unexpected status with a structured error body
    #[error("{0}")]
    Api(ApiErrorBody),

    /// Unexpected status and the body was not a valid error payload
    #[error("failed to parse error message (status {status}): {source}")]
    ErrorBodyParse {
        /// HTTP status code of the response
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// Expected status, but the body does not match the requested type
    #[error("failed to decode response: {0}")]
    ResponseDecode(#[source] serde_json::Error),

    /// Mutating request attempted without a token
    #[error("token is required for {method} request")]
    AuthRequired {
        /// Method of the rejected request
        method: Method,
    },

    /// Caller supplied an argument the client cannot use
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Request body could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Returns the status code reported by the server, if this error carries one.
    ///
    /// For [`ClientError::Api`] this is the body's `code`, which falls back to
    /// the HTTP status when the body leaves it unset.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api(body) => Some(body.code),
            ClientError::ErrorBodyParse { status, .. } => Some(*status),
            ClientError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true if the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
