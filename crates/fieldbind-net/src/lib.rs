//! fieldbind Networking
//!
//! The transport contract a binder talks to: POST a payload to a routed
//! endpoint, get back an `{code, data, message}` envelope.

mod client;
mod envelope;
pub mod loader;
mod memory;

use serde::{Deserialize, Serialize};

pub use client::ApiClient;
pub use envelope::{CODE_SUCCESS, Envelope};
pub use loader::{HttpTransport, Request, Transport};
pub use memory::MemoryTransport;

/// HTTP Response
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    /// Check if response is OK (2xx)
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Network error
#[derive(Debug, thiserror::Error)]
pub enum NetError {
    #[error("API error {code}: {message}")]
    Api { code: i64, message: String },

    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl NetError {
    /// Message to surface to a user-facing error handler
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// API client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL endpoints are resolved against; `None` keeps them relative
    pub base_url: Option<String>,
    /// Routing prefix put in front of endpoints that lack it
    pub prefix: String,
    /// Form field carrying the JSON payload
    pub payload_key: String,
    /// Request timeout in milliseconds (0 disables)
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            prefix: "index.php?r=".to_string(),
            payload_key: "payload".to_string(),
            timeout_ms: 30_000,
            user_agent: format!("fieldbind/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
